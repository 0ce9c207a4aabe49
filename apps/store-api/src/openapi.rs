use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store API",
        version = "0.1.0",
        description = "Stores and the products they sell"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/stores", api = domain_stores::StoresApiDoc),
        (path = "/products", api = domain_stores::ProductsApiDoc)
    )
)]
pub struct ApiDoc;
