use crate::domain::{ContactSearch, GroupSearch, MessageSearch, Page, RequestId};

pub fn encode_page(page: Page) -> Vec<(String, String)> {
    vec![
        (Page::START_INDEX.to_owned(), page.start_index().to_string()),
        (Page::MAX_ROWS.to_owned(), page.limit.to_string()),
    ]
}

pub fn encode_contact_search_query(search: &ContactSearch, page: Page) -> Vec<(String, String)> {
    let mut params = encode_page(page);
    push_opt(&mut params, "email", search.email.as_deref());
    push_opt(&mut params, "sms", search.sms.as_deref());
    push_opt(&mut params, "firstname", search.first_name.as_deref());
    push_opt(&mut params, "lastname", search.last_name.as_deref());
    push_opt(
        &mut params,
        "externalCustomerId",
        search.external_customer_id.as_deref(),
    );
    params
}

pub fn encode_group_search_query(search: &GroupSearch, page: Page) -> Vec<(String, String)> {
    let mut params = encode_page(page);
    push_opt(&mut params, "name", search.name.as_deref());
    params
}

pub fn encode_message_search_query(search: &MessageSearch, page: Page) -> Vec<(String, String)> {
    let mut params = encode_page(page);
    push_opt(&mut params, "search", search.search.as_deref());
    push_opt(&mut params, "tag", search.tag.as_deref());
    params
}

pub fn encode_ids_query(ids: &[RequestId]) -> Vec<(String, String)> {
    vec![(
        RequestId::FIELD.to_owned(),
        ids.iter()
            .map(RequestId::as_str)
            .collect::<Vec<_>>()
            .join(","),
    )]
}

fn push_opt(params: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        params.push((key.to_owned(), value.to_owned()));
    }
}
