//! Listing query parameters and the dynamic WHERE builder used by the
//! Postgres repository.

use sea_orm::Value;
use serde::Deserialize;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::pagination::Pagination;

const DEFAULT_LIMIT: u64 = 10;

/// Columns matched by the free-text search
const SEARCHABLE_FIELDS: [&str; 1] = ["name"];

/// Raw listing query string: `?limit=&page=&search=&sortBy=&sortDirection=`
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Page size, defaults to 10
    pub limit: Option<i64>,
    /// 1-based page number
    pub page: Option<i64>,
    /// Case-insensitive substring match on the product name
    pub search: Option<String>,
    /// `price`, `name` or `created_at`
    pub sort_by: Option<String>,
    /// `asc` or `desc`
    pub sort_direction: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortBy {
    Price,
    Name,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortBy {
    pub fn column(&self) -> &'static str {
        match self {
            SortBy::Price => "price",
            SortBy::Name => "name",
            SortBy::CreatedAt => "created_at",
        }
    }
}

/// Listing parameters after defaults and clamping
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub limit: u64,
    pub page: u64,
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
}

impl ProductQuery {
    /// Never fails: unknown sort keys fall back to `created_at DESC`,
    /// non-positive limit becomes 10 and non-positive page becomes 1.
    pub fn normalize(self) -> ListParams {
        let limit = match self.limit {
            Some(limit) if limit > 0 => limit as u64,
            _ => DEFAULT_LIMIT,
        };
        let page = match self.page {
            Some(page) if page > 0 => page as u64,
            _ => 1,
        };

        ListParams {
            limit,
            page,
            search: self.search.filter(|s| !s.is_empty()),
            sort_by: self
                .sort_by
                .as_deref()
                .and_then(|s| SortBy::from_str(s).ok())
                .unwrap_or_default(),
            sort_direction: self
                .sort_direction
                .as_deref()
                .and_then(|s| SortDirection::from_str(s).ok())
                .unwrap_or_default(),
        }
    }
}

/// Search, sort and window for one product listing
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilterPagination {
    pub limit: u64,
    pub offset: u64,
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
}

impl SearchFilterPagination {
    pub fn new(params: &ListParams, pagination: &Pagination) -> Self {
        Self {
            limit: pagination.limit,
            offset: pagination.offset,
            search: params.search.clone(),
            sort_by: params.sort_by,
            sort_direction: params.sort_direction,
        }
    }

    /// Append filtering (and, with `use_pagination`, ordering and windowing)
    /// to `base`. Every caller-supplied value is returned as a bind parameter.
    pub fn build_where(
        &self,
        base: &str,
        use_pagination: bool,
        store_id: Option<Uuid>,
    ) -> (String, Vec<Value>) {
        let mut sql = format!("{base} WHERE 1=1");
        let mut values: Vec<Value> = Vec::new();

        if let Some(store_id) = store_id {
            values.push(store_id.into());
            sql.push_str(&format!(" AND store_id = ${}", values.len()));
        }

        if let Some(term) = self.search.as_deref() {
            let pattern = format!("%{}%", escape_like(term));
            let mut clauses = Vec::with_capacity(SEARCHABLE_FIELDS.len());
            for field in SEARCHABLE_FIELDS {
                values.push(pattern.clone().into());
                clauses.push(format!("{field} ILIKE ${}", values.len()));
            }
            sql.push_str(&format!(" AND ({})", clauses.join(" OR ")));
        }

        if use_pagination {
            sql.push_str(&format!(
                " ORDER BY {} {}",
                self.sort_by.column(),
                self.sort_direction
            ));

            if self.limit != 0 {
                values.push(bigint(self.limit).into());
                values.push(bigint(self.offset).into());
                sql.push_str(&format!(
                    " LIMIT ${} OFFSET ${}",
                    values.len() - 1,
                    values.len()
                ));
            }
        }

        (sql, values)
    }
}

/// Escape `ILIKE` metacharacters so the search term matches literally.
/// Postgres uses `\` as the default escape character.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `Pagination::new` keeps windows within `BIGINT`; saturate for filters built by hand.
fn bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sfp(search: Option<&str>) -> SearchFilterPagination {
        SearchFilterPagination {
            limit: 10,
            offset: 20,
            search: search.map(str::to_string),
            sort_by: SortBy::Price,
            sort_direction: SortDirection::Asc,
        }
    }

    #[test]
    fn test_normalize_defaults() {
        let params = ProductQuery::default().normalize();
        assert_eq!(params.limit, 10);
        assert_eq!(params.page, 1);
        assert_eq!(params.search, None);
        assert_eq!(params.sort_by, SortBy::CreatedAt);
        assert_eq!(params.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_normalize_is_case_insensitive() {
        let params = ProductQuery {
            sort_by: Some("PRICE".into()),
            sort_direction: Some("asc".into()),
            ..Default::default()
        }
        .normalize();
        assert_eq!(params.sort_by, SortBy::Price);
        assert_eq!(params.sort_direction, SortDirection::Asc);

        let params = ProductQuery {
            sort_by: Some("Created_At".into()),
            ..Default::default()
        }
        .normalize();
        assert_eq!(params.sort_by, SortBy::CreatedAt);
    }

    #[test]
    fn test_normalize_clamps_and_falls_back() {
        let params = ProductQuery {
            limit: Some(-5),
            page: Some(0),
            search: Some(String::new()),
            sort_by: Some("price; DROP TABLE products".into()),
            sort_direction: Some("sideways".into()),
        }
        .normalize();
        assert_eq!(params.limit, 10);
        assert_eq!(params.page, 1);
        assert_eq!(params.search, None);
        assert_eq!(params.sort_by, SortBy::CreatedAt);
        assert_eq!(params.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_build_where_count_has_no_window() {
        let (sql, values) = sfp(None).build_where("SELECT count(*) FROM products", false, None);
        assert_eq!(sql, "SELECT count(*) FROM products WHERE 1=1");
        assert!(values.is_empty());
    }

    #[test]
    fn test_build_where_with_search_and_window() {
        let (sql, values) = sfp(Some("wid")).build_where("SELECT * FROM products", true, None);
        assert_eq!(
            sql,
            "SELECT * FROM products WHERE 1=1 AND (name ILIKE $1) ORDER BY price ASC LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            values,
            vec![
                Value::from("%wid%".to_string()),
                Value::from(10i64),
                Value::from(20i64)
            ]
        );
    }

    #[test]
    fn test_build_where_scope_is_a_parameter() {
        let store_id = Uuid::now_v7();
        let (sql, values) =
            sfp(Some("x")).build_where("SELECT count(*) FROM products", false, Some(store_id));
        assert_eq!(
            sql,
            "SELECT count(*) FROM products WHERE 1=1 AND store_id = $1 AND (name ILIKE $2)"
        );
        assert_eq!(values[0], Value::from(store_id));
        assert!(!sql.contains(&store_id.to_string()));
    }

    #[test]
    fn test_build_where_zero_limit_skips_window() {
        let mut filter = sfp(None);
        filter.limit = 0;
        let (sql, values) = filter.build_where("SELECT * FROM products", true, None);
        assert_eq!(sql, "SELECT * FROM products WHERE 1=1 ORDER BY price ASC");
        assert!(values.is_empty());
    }

    #[test]
    fn test_build_where_binds_caller_window() {
        let query = ProductQuery {
            limit: Some(25),
            page: Some(4),
            ..Default::default()
        };
        let params = query.normalize();
        let pagination = Pagination::new(params.limit, params.page).unwrap();
        let filter = SearchFilterPagination::new(&params, &pagination);

        let (sql, values) = filter.build_where("SELECT * FROM products", true, None);
        assert!(sql.ends_with("ORDER BY created_at DESC LIMIT $1 OFFSET $2"), "{sql}");
        assert_eq!(values, vec![Value::from(25i64), Value::from(75i64)]);
    }

    #[test]
    fn test_build_where_largest_window_stays_positive() {
        let params = ProductQuery {
            limit: Some(i64::MAX),
            page: Some(2),
            ..Default::default()
        }
        .normalize();
        let pagination = Pagination::new(params.limit, params.page).unwrap();
        let filter = SearchFilterPagination::new(&params, &pagination);

        let (_, values) = filter.build_where("SELECT * FROM products", true, None);
        assert_eq!(values, vec![Value::from(i64::MAX), Value::from(i64::MAX)]);
    }

    #[test]
    fn test_build_where_saturates_hand_built_window() {
        let mut filter = sfp(None);
        filter.limit = u64::MAX;
        filter.offset = u64::MAX - 1;

        let (_, values) = filter.build_where("SELECT * FROM products", true, None);
        assert_eq!(values, vec![Value::from(i64::MAX), Value::from(i64::MAX)]);
    }

    #[test]
    fn test_search_wildcards_are_escaped() {
        let (sql, values) = sfp(Some(r"50%_off\")).build_where("SELECT * FROM products", false, None);
        assert_eq!(sql, "SELECT * FROM products WHERE 1=1 AND (name ILIKE $1)");
        assert_eq!(values, vec![Value::from(r"%50\%\_off\\%".to_string())]);
    }
}
