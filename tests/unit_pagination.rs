use campusgate::utils::pagination::PaginationParams;

#[test]
fn test_defaults() {
    let params = PaginationParams::default();
    assert_eq!(params.limit(), 10);
    assert_eq!(params.offset(), 0);
    assert_eq!(params.page(), None);
}

#[test]
fn test_limit_clamped() {
    let params = PaginationParams {
        limit: Some(1000),
        offset: Some(0),
        page: None,
    };
    assert_eq!(params.limit(), 100);

    let params = PaginationParams {
        limit: Some(0),
        offset: Some(0),
        page: None,
    };
    assert_eq!(params.limit(), 1);

    let params = PaginationParams {
        limit: Some(-5),
        offset: Some(0),
        page: None,
    };
    assert_eq!(params.limit(), 1);
}

#[test]
fn test_negative_offset_floored() {
    let params = PaginationParams {
        limit: Some(10),
        offset: Some(-20),
        page: None,
    };
    assert_eq!(params.offset(), 0);
}

#[test]
fn test_page_takes_precedence_over_offset() {
    let params = PaginationParams {
        limit: Some(20),
        offset: Some(55),
        page: Some(3),
    };
    assert_eq!(params.offset(), 40);
    assert_eq!(params.page(), Some(3));
}

#[test]
fn test_page_floored_at_one() {
    let params = PaginationParams {
        limit: Some(10),
        offset: None,
        page: Some(0),
    };
    assert_eq!(params.page(), Some(1));
    assert_eq!(params.offset(), 0);
}

#[test]
fn test_empty_string_params_deserialize_as_none() {
    let params: PaginationParams = serde_json::from_value(serde_json::json!({
        "limit": "",
        "offset": "",
        "page": ""
    }))
    .expect("should deserialize");
    assert_eq!(params.limit(), 10);
    assert_eq!(params.offset(), 0);
    assert_eq!(params.page(), None);
}

#[test]
fn test_string_numbers_deserialize() {
    let params: PaginationParams = serde_json::from_value(serde_json::json!({
        "limit": "25",
        "offset": "50"
    }))
    .expect("should deserialize");
    assert_eq!(params.limit(), 25);
    assert_eq!(params.offset(), 50);
}
