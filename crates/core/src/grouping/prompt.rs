//! Request construction and response parsing

use serde::Serialize;
use serde_json::{json, Value};

use super::GroupingError;
use crate::models::{AiGroup, Student};

/// Fixed role framing sent with every grouping request
pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant that helps a teacher divide the students in a classroom into groups.";

pub const JSON_MIME_TYPE: &str = "application/json";

/// Provider-neutral description of one generation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl GenerationRequest {
    pub fn for_groups(
        model: &str,
        students: &[Student],
        group_count: u32,
        instructions: &str,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            model: model.to_string(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: build_prompt(students, group_count, instructions)?,
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema: response_schema(),
        })
    }
}

/// Parse the group count field; anything but a whole number >= 1 is rejected
pub fn parse_group_count(text: &str) -> Result<u32, GroupingError> {
    match text.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(GroupingError::InvalidGroupCount),
    }
}

/// Natural-language instruction embedding the roster as JSON
pub fn build_prompt(
    students: &[Student],
    group_count: u32,
    instructions: &str,
) -> Result<String, serde_json::Error> {
    let roster = serde_json::to_string(students)?;
    let instructions = match instructions.trim() {
        "" => "none",
        text => text,
    };
    Ok(format!(
        "The current list of students is: {roster}.\n\
         Divide these students into {group_count} groups.\n\
         Additional instructions: {instructions}.\n\
         Return the result strictly in the specified JSON schema."
    ))
}

/// Output schema: an array of `{groupNumber, students: [{id, name}]}`
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "groupNumber": { "type": "NUMBER", "description": "Group number" },
                "students": {
                    "type": "ARRAY",
                    "description": "Students in the group",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "id": { "type": "NUMBER", "description": "Student ID" },
                            "name": { "type": "STRING", "description": "Student name" }
                        },
                        "required": ["id", "name"]
                    }
                }
            },
            "required": ["groupNumber", "students"]
        }
    })
}

/// Decode the service's JSON text into groups
pub fn parse_groups(text: &str) -> Result<Vec<AiGroup>, serde_json::Error> {
    serde_json::from_str(text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group_count() {
        assert_eq!(parse_group_count("4"), Ok(4));
        assert_eq!(parse_group_count(" 12 "), Ok(12));
        assert_eq!(parse_group_count("0"), Err(GroupingError::InvalidGroupCount));
        assert_eq!(parse_group_count("-2"), Err(GroupingError::InvalidGroupCount));
        assert_eq!(parse_group_count("2.5"), Err(GroupingError::InvalidGroupCount));
        assert_eq!(parse_group_count(""), Err(GroupingError::InvalidGroupCount));
    }

    #[test]
    fn test_prompt_embeds_roster_and_count() {
        let students = vec![Student::new(1, "Ada"), Student::new(2, "Grace")];
        let prompt = build_prompt(&students, 3, "keep 1 and 2 apart").unwrap();
        assert!(prompt.contains(r#"[{"id":1,"name":"Ada"},{"id":2,"name":"Grace"}]"#));
        assert!(prompt.contains("into 3 groups"));
        assert!(prompt.contains("Additional instructions: keep 1 and 2 apart."));
    }

    #[test]
    fn test_prompt_without_instructions() {
        let prompt = build_prompt(&[Student::new(1, "Ada")], 1, "   ").unwrap();
        assert!(prompt.contains("Additional instructions: none."));
    }

    #[test]
    fn test_schema_requires_fields() {
        let schema = response_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["required"], json!(["groupNumber", "students"]));
        assert_eq!(
            schema["items"]["properties"]["students"]["items"]["required"],
            json!(["id", "name"])
        );
    }

    #[test]
    fn test_request_for_groups() {
        let request =
            GenerationRequest::for_groups("gemini-2.5-flash", &[Student::new(1, "Ada")], 2, "")
                .unwrap();
        assert_eq!(request.model, "gemini-2.5-flash");
        assert_eq!(request.response_mime_type, JSON_MIME_TYPE);
        assert_eq!(request.system_instruction, SYSTEM_INSTRUCTION);
        assert_eq!(request.response_schema, response_schema());
    }

    #[test]
    fn test_parse_groups() {
        let text = r#"
            [{"groupNumber": 1, "students": [{"id": 1, "name": "Ada"}]},
             {"groupNumber": 2.0, "students": []}]
        "#;
        let groups = parse_groups(text).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].group_number, 2);
        assert!(groups[1].students.is_empty());
    }

    #[test]
    fn test_parse_groups_rejects_wrong_shape() {
        assert!(parse_groups(r#"{"groupNumber": 1, "students": []}"#).is_err());
        assert!(parse_groups("Here are your groups!").is_err());
        assert!(parse_groups("").is_err());
    }
}
