//! Query string parsing for the list endpoint.
//!
//! `name` may repeat (`?name=Pizza&name=Sushi`), which is why the raw query
//! string is parsed here instead of through a derived extractor.

use url::form_urlencoded;

use crate::domain::FilterQueryParametersBo;

use super::validation::ValidationError;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Parses `name`, `cuisine`, `page` and `pageSize`. Unknown keys are ignored.
pub fn parse_list_query(raw: Option<&str>) -> Result<FilterQueryParametersBo, ValidationError> {
    let mut params = FilterQueryParametersBo::default();
    let Some(raw) = raw else {
        return Ok(params);
    };

    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "name" => params.names.push(value.into_owned()),
            "cuisine" => params.cuisine_type = Some(value.into_owned()),
            "page" => params.pagination.page = parse_positive("page", &value, u64::MAX)?,
            "pageSize" => params.pagination.page_size = parse_positive("pageSize", &value, MAX_PAGE_SIZE)?,
            _ => {}
        }
    }
    Ok(params)
}

fn parse_positive(field: &str, value: &str, max: u64) -> Result<u64, ValidationError> {
    match value.parse::<u64>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(ValidationError::single(
            field,
            format!("must be an integer between 1 and {max}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Pagination, DEFAULT_PAGE_SIZE};

    #[test]
    fn missing_query_uses_defaults() {
        assert_eq!(parse_list_query(None).unwrap(), FilterQueryParametersBo::default());
        assert_eq!(parse_list_query(Some("")).unwrap().pagination.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn repeated_names_and_paging() {
        let params = parse_list_query(Some("name=Pizza&name=Sushi%20Bar&cuisine=Italian&page=2&pageSize=10")).unwrap();
        assert_eq!(params.names, ["Pizza", "Sushi Bar"]);
        assert_eq!(params.cuisine_type.as_deref(), Some("Italian"));
        assert_eq!(params.pagination, Pagination { page: 2, page_size: 10 });
    }

    #[test]
    fn bad_paging_is_rejected() {
        for query in ["page=0", "page=-1", "pageSize=abc", "pageSize=1000"] {
            assert!(parse_list_query(Some(query)).is_err(), "{query}");
        }
    }
}
