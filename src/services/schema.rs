//! 推荐结果的输出约束
//!
//! 同一份 schema 既随请求发送给补全服务，也用于在本地校验返回的文档。
//! 使用补全服务的 OpenAPI 子集写法（`OBJECT` / `ARRAY` / `STRING`）。

use once_cell::sync::Lazy;
use serde_json::{json, Value};

static RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "classification": {
                "type": "STRING",
                "description": "One line classification of product type and audience."
            },
            "buildApproach": {
                "type": "STRING",
                "description": "The single best build approach (e.g., Code, Low-code, No-code)."
            },
            "stack": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "Name of the tool." },
                        "category": {
                            "type": "STRING",
                            "description": "Category (Frontend, Backend, Database, Hosting, Collab)."
                        },
                        "description": {
                            "type": "STRING",
                            "description": "Why this choice was made (one short sentence)."
                        }
                    },
                    "required": ["name", "category", "description"]
                }
            },
            "whatNotToUse": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "tool": { "type": "STRING", "description": "Name of the tool to avoid." },
                        "reason": { "type": "STRING", "description": "Why it is a bad choice." }
                    },
                    "required": ["tool", "reason"]
                }
            },
            "mvpCutLine": {
                "type": "OBJECT",
                "properties": {
                    "mustBuild": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Features that MUST be built for v1."
                    },
                    "mustCut": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Features that MUST be cut for v1."
                    }
                },
                "required": ["mustBuild", "mustCut"]
            },
            "commonMistake": {
                "type": "STRING",
                "description": "The single biggest mistake someone building this would make."
            },
            "whyThisStackWins": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "2-3 short bullet points explaining why this stack is better than alternatives under the chosen constraint."
            }
        },
        "required": [
            "classification",
            "buildApproach",
            "stack",
            "whatNotToUse",
            "mvpCutLine",
            "commonMistake",
            "whyThisStackWins"
        ]
    })
});

/// 推荐结果 schema
pub fn response_schema() -> &'static Value {
    &RESPONSE_SCHEMA
}

/// 按 schema 校验文档，返回所有违规项（`路径: 原因`）
pub fn validate(schema: &Value, doc: &Value) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();
    check(schema, doc, "$", &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check(schema: &Value, value: &Value, path: &str, out: &mut Vec<String>) {
    let expected = schema.get("type").and_then(Value::as_str).unwrap_or("");

    match expected {
        "OBJECT" => {
            let Some(obj) = value.as_object() else {
                out.push(format!("{}: expected object, got {}", path, kind(value)));
                return;
            };

            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for name in required.iter().filter_map(Value::as_str) {
                    if !obj.contains_key(name) {
                        out.push(format!("{}.{}: missing required field", path, name));
                    }
                }
            }

            if let Some(props) = schema.get("properties").and_then(Value::as_object) {
                for (name, prop_schema) in props {
                    if let Some(child) = obj.get(name) {
                        check(prop_schema, child, &format!("{}.{}", path, name), out);
                    }
                }
            }
        }
        "ARRAY" => {
            let Some(items) = value.as_array() else {
                out.push(format!("{}: expected array, got {}", path, kind(value)));
                return;
            };

            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    check(item_schema, item, &format!("{}[{}]", path, i), out);
                }
            }
        }
        "STRING" => {
            if !value.is_string() {
                out.push(format!("{}: expected string, got {}", path, kind(value)));
            }
        }
        _ => {}
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
