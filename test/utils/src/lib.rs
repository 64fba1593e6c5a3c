use serde_json::json;
use serde_json::Value;

pub fn task_fixture(id: &str, title: &str) -> Value {
    return json!({
        "id": id,
        "account_id": "acc-1",
        "title": title,
        "description": format!("{title} description"),
        "active": true,
        "created_at": "2024-01-01T10:00:00Z",
        "updated_at": "2024-01-01T10:00:00Z",
    });
}

pub fn comment_fixture(id: &str, task_id: &str, content: &str) -> Value {
    return json!({
        "id": id,
        "task_id": task_id,
        "account_id": "acc-1",
        "content": content,
        "created_at": "2024-01-02T10:00:00Z",
        "updated_at": "2024-01-02T10:00:00Z",
    });
}

pub fn chatbot_help_fixture() -> Value {
    return json!({
        "success": true,
        "response": "**Commands**\n- list",
        "type": "help",
    });
}
