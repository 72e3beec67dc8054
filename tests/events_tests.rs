use serde_json::json;

use gem_concierge::services::events::{AgentEvent, FALLBACK_REPLY, extract_gems, extract_reply};

fn events(value: serde_json::Value) -> Vec<AgentEvent> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn prefers_most_recent_text() {
    let events = events(json!([
        {"content": {"role": "model", "parts": [{"text": "first answer"}]}},
        {"content": {"role": "model", "parts": [{"text": "second answer"}]}}
    ]));
    assert_eq!(extract_reply(&events), "second answer");
}

#[test]
fn skips_events_without_content() {
    let events = events(json!([
        {"content": {"role": "model", "parts": [{"text": "the real reply"}]}},
        {"content": null},
        {"author": "system"}
    ]));
    assert_eq!(extract_reply(&events), "the real reply");
}

#[test]
fn concatenates_text_parts_of_one_event() {
    let events = events(json!([
        {"content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "world"}]}}
    ]));
    assert_eq!(extract_reply(&events), "Hello, world");
}

#[test]
fn falls_back_to_function_result() {
    let events = events(json!([
        {"content": {"role": "model", "parts": [
            {"function_response": {"name": "weather", "response": {"result": "Sunny, 24C"}}}
        ]}}
    ]));
    assert_eq!(extract_reply(&events), "Sunny, 24C");
}

#[test]
fn text_beats_function_result_in_same_event() {
    let events = events(json!([
        {"content": {"role": "model", "parts": [
            {"function_response": {"name": "weather", "response": {"result": "raw tool output"}}},
            {"text": "polished summary"}
        ]}}
    ]));
    assert_eq!(extract_reply(&events), "polished summary");
}

#[test]
fn only_result_key_is_honored() {
    let events = events(json!([
        {"content": {"role": "model", "parts": [
            {"function_response": {"name": "weather", "response": {"output": "ignored"}}}
        ]}}
    ]));
    assert_eq!(extract_reply(&events), FALLBACK_REPLY);
}

#[test]
fn empty_sequence_returns_fallback() {
    assert_eq!(extract_reply(&[]), FALLBACK_REPLY);
}

#[test]
fn fully_null_sequence_returns_fallback() {
    let events = events(json!([
        {"content": null},
        {"content": {"role": "model", "parts": []}},
        {"content": {"role": "model", "parts": [{"text": ""}]}}
    ]));
    assert_eq!(extract_reply(&events), FALLBACK_REPLY);
}

#[test]
fn gems_found_in_function_response() {
    let events = events(json!([
        {"content": {"role": "model", "parts": [
            {"function_response": {"name": "analysis_tool", "response": {
                "status": "success",
                "gems": [{"name": "Quiet Falls", "rating": 4.9, "review_count": 120,
                          "address": "Forest Rd 7", "photo_urls": ["https://photos.example/1.jpg"]}]
            }}}
        ]}}
    ]));
    let gems = extract_gems(&events).unwrap();
    assert_eq!(gems.len(), 1);
    assert_eq!(gems[0].name, "Quiet Falls");
    assert_eq!(gems[0].review_count, 120);
}

#[test]
fn gems_found_in_fenced_markdown_text() {
    let text = "Here you go!\n```json\n{\"gems\": [{\"name\": \"Moss Garden\", \
                \"rating\": 4.7, \"review_count\": 45, \"address\": \"Hill Lane 3\", \
                \"photo_urls\": []}]}\n```";
    let events = events(json!([
        {"content": {"role": "model", "parts": [{"text": text}]}}
    ]));
    let gems = extract_gems(&events).unwrap();
    assert_eq!(gems.len(), 1);
    assert_eq!(gems[0].name, "Moss Garden");
}

#[test]
fn gems_found_in_nested_result_string() {
    let events = events(json!([
        {"content": {"role": "model", "parts": [
            {"function_response": {"name": "finder", "response": {
                "result": "{\"gems\": [{\"name\": \"Birch Hollow\", \"rating\": 4.2, \
                           \"review_count\": 10, \"address\": \"Birch Path 9\", \"photo_urls\": []}]}"
            }}}
        ]}}
    ]));
    let gems = extract_gems(&events).unwrap();
    assert_eq!(gems[0].name, "Birch Hollow");
}

#[test]
fn alternate_key_spellings_decode() {
    let events = events(json!([
        {"content": {"role": "model", "parts": [
            {"function_response": {"name": "analysis_tool", "response": {
                "gems": [{"placeName": "Quiet Falls", "rating": 4.9, "reviewCount": 120,
                          "photos": ["https://photos.example/1.jpg"]}]
            }}}
        ]}}
    ]));
    let gems = extract_gems(&events).unwrap();
    assert_eq!(gems[0].name, "Quiet Falls");
    assert_eq!(gems[0].review_count, 120);
    assert_eq!(gems[0].photo_urls.len(), 1);
}

#[test]
fn malformed_json_yields_no_gems() {
    let events = events(json!([
        {"content": {"role": "model", "parts": [{"text": "{\"gems\": [oops"}]}}
    ]));
    assert!(extract_gems(&events).is_none());
}

#[test]
fn text_without_gems_yields_none() {
    let events = events(json!([
        {"content": {"role": "model", "parts": [{"text": "Which one do you like?"}]}}
    ]));
    assert!(extract_gems(&events).is_none());
}
