use serde_json::{json, Value};

/// Factory for Bruno report fixtures
pub struct Factory;

#[allow(dead_code)]
impl Factory {
    /// Wrap records into a report object
    pub fn report(records: Vec<Value>) -> Value {
        json!({
            "summary": { "totalRequests": records.len() },
            "results": records
        })
    }

    /// The "Get user" record with one assertion of the given status
    pub fn get_user(assertion_status: &str, error: Option<&str>) -> Value {
        let mut assertion = json!({
            "description": "status is 200",
            "status": assertion_status
        });
        if let Some(error) = error {
            assertion["error"] = json!(error);
        }

        json!({
            "name": "Get user",
            "path": "Users/Get",
            "request": {
                "method": "GET",
                "url": "http://x/u",
                "headers": {}
            },
            "response": {
                "status": 200,
                "headers": {},
                "data": { "id": 1 }
            },
            "testResults": [assertion]
        })
    }

    /// A fully populated record with assertions in all three lists
    pub fn create_user(index: usize) -> Value {
        json!({
            "name": format!("Create user {}", index),
            "path": "Users\\Create",
            "description": "Creates a user",
            "timestamp": "2024-05-01T10:00:00.000Z",
            "duration": 90,
            "status": "pass",
            "request": {
                "method": "POST",
                "url": "https://api.example.com/users",
                "headers": { "content-type": "application/json", "x-retry": 2 },
                "data": { "name": "Ada" }
            },
            "response": {
                "status": 201,
                "headers": { "location": "/users/1" },
                "data": "created",
                "responseTime": 42
            },
            "preRequestTestResults": [{ "description": "token set", "status": "pass" }],
            "testResults": [{ "description": "status is 201", "status": "pass" }],
            "postResponseTestResults": [{ "description": "location header", "status": "PASS" }]
        })
    }
}
