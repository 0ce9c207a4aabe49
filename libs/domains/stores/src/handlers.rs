use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, AppError, UuidPath,
    errors::responses::{
        BadRequestResponse, EmptySuccessResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Product, ProductRequest, Store, StoreRequest};
use crate::pagination::Paginated;
use crate::query::ProductQuery;
use crate::repository::StoreRepository;
use crate::service::StoreService;

const STORES_TAG: &str = "Stores";
const PRODUCTS_TAG: &str = "Products";

type HandlerResult<T> = Result<ApiResponse<T>, AppError>;
type SharedService<R> = State<Arc<StoreService<R>>>;

/// OpenAPI documentation for `/stores`
#[derive(OpenApi)]
#[openapi(
    paths(create_store, get_store, update_store, list_store_products),
    components(
        schemas(Store, StoreRequest, Product),
        responses(
            EmptySuccessResponse,
            BadRequestResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = STORES_TAG, description = "Store management endpoints"))
)]
pub struct StoresApiDoc;

/// OpenAPI documentation for `/products`
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product_by_slug,
        update_product,
        delete_product
    ),
    components(
        schemas(Product, ProductRequest, Store),
        responses(
            EmptySuccessResponse,
            BadRequestResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = PRODUCTS_TAG, description = "Product catalogue endpoints"))
)]
pub struct ProductsApiDoc;

/// Both resource routers under `/stores` and `/products`, sharing one service.
pub fn router<R: StoreRepository + 'static>(service: StoreService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .nest("/stores", stores_router(shared_service.clone()))
        .nest("/products", products_router(shared_service))
}

pub fn stores_router<R: StoreRepository + 'static>(service: Arc<StoreService<R>>) -> Router {
    Router::new()
        .route("/", post(create_store))
        .route("/{id}", get(get_store).put(update_store))
        .route("/{id}/products", get(list_store_products))
        .with_state(service)
}

pub fn products_router<R: StoreRepository + 'static>(service: Arc<StoreService<R>>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{key}",
            get(get_product_by_slug)
                .put(update_product)
                .delete(delete_product),
        )
        .with_state(service)
}

/// Create a store
#[utoipa::path(
    post,
    path = "",
    tag = STORES_TAG,
    request_body = StoreRequest,
    responses(
        (status = 200, description = "Store created", body = ApiResponse<Store>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_store<R: StoreRepository>(
    State(service): SharedService<R>,
    payload: Result<Json<StoreRequest>, JsonRejection>,
) -> HandlerResult<Store> {
    let Json(input) = payload?;
    let store = service.create_store(input).await?;
    Ok(ApiResponse::success(store))
}

/// Get a store by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = STORES_TAG,
    params(("id" = Uuid, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store found", body = ApiResponse<Store>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_store<R: StoreRepository>(
    State(service): SharedService<R>,
    UuidPath(id): UuidPath,
) -> HandlerResult<Store> {
    let store = service.get_store(id).await?;
    Ok(ApiResponse::success(store))
}

/// Replace a store's details
#[utoipa::path(
    put,
    path = "/{id}",
    tag = STORES_TAG,
    params(("id" = Uuid, Path, description = "Store ID")),
    request_body = StoreRequest,
    responses(
        (status = 200, response = EmptySuccessResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_store<R: StoreRepository>(
    State(service): SharedService<R>,
    UuidPath(id): UuidPath,
    payload: Result<Json<StoreRequest>, JsonRejection>,
) -> HandlerResult<()> {
    let Json(input) = payload?;
    service.update_store(id, input).await?;
    Ok(ApiResponse::empty())
}

/// List one store's products
#[utoipa::path(
    get,
    path = "/{id}/products",
    tag = STORES_TAG,
    params(("id" = Uuid, Path, description = "Store ID"), ProductQuery),
    responses(
        (status = 200, description = "One page of the store's products", body = ApiResponse<Paginated<Product>>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_store_products<R: StoreRepository>(
    State(service): SharedService<R>,
    UuidPath(id): UuidPath,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> HandlerResult<Paginated<Product>> {
    let Query(query) = query?;
    let page = service.list_store_products(id, query).await?;
    Ok(ApiResponse::success(page))
}

/// List products across all stores
#[utoipa::path(
    get,
    path = "",
    tag = PRODUCTS_TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "One page of products", body = ApiResponse<Paginated<Product>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: StoreRepository>(
    State(service): SharedService<R>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> HandlerResult<Paginated<Product>> {
    let Query(query) = query?;
    let page = service.list_products(query).await?;
    Ok(ApiResponse::success(page))
}

/// Create a product in an existing store
#[utoipa::path(
    post,
    path = "",
    tag = PRODUCTS_TAG,
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product created", body = ApiResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: StoreRepository>(
    State(service): SharedService<R>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> HandlerResult<Product> {
    let Json(input) = payload?;
    let product = service.create_product(input).await?;
    Ok(ApiResponse::success(product))
}

/// Get a product by its slug
#[utoipa::path(
    get,
    path = "/{slug}",
    tag = PRODUCTS_TAG,
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product_by_slug<R: StoreRepository>(
    State(service): SharedService<R>,
    Path(slug): Path<String>,
) -> HandlerResult<Product> {
    let product = service.get_product_by_slug(&slug).await?;
    Ok(ApiResponse::success(product))
}

/// Replace a product's details; the slug is kept
#[utoipa::path(
    put,
    path = "/{id}",
    tag = PRODUCTS_TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses(
        (status = 200, response = EmptySuccessResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: StoreRepository>(
    State(service): SharedService<R>,
    UuidPath(id): UuidPath,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> HandlerResult<()> {
    let Json(input) = payload?;
    service.update_product(id, input).await?;
    Ok(ApiResponse::empty())
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PRODUCTS_TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, response = EmptySuccessResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: StoreRepository>(
    State(service): SharedService<R>,
    UuidPath(id): UuidPath,
) -> HandlerResult<()> {
    service.delete_product(id).await?;
    Ok(ApiResponse::empty())
}
