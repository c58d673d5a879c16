//! 题目校验
//!
//! 把模型返回的文本解析为 JSON，并逐字段检查题目结构。
//! 一整批要么全部通过，要么全部作废：任何一题不合法都返回错误，不会只过滤掉坏题。

use serde_json::{Map, Value};

use crate::error::{GenerationError, ValidationError};
use crate::models::{Mcq, OPTION_COUNT};

/// 解析并校验模型返回的原始文本
pub fn parse_mcqs(raw: &str) -> Result<Vec<Mcq>, GenerationError> {
    let value: Value = serde_json::from_str(raw.trim())?;
    Ok(validate_mcqs(&value)?)
}

/// 严格 JSON 对象模式下，题目数组可以包在这个字段里
pub const QUESTIONS_WRAPPER_KEY: &str = "questions";

/// 校验已解析的 JSON，成功时返回去除首尾空白后的题目
///
/// 顶层可以是题目数组，也可以是 `{"questions": [...]}`。
pub fn validate_mcqs(value: &Value) -> Result<Vec<Mcq>, ValidationError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(object) => object
            .get(QUESTIONS_WRAPPER_KEY)
            .and_then(Value::as_array)
            .ok_or(ValidationError::NotAnArray)?,
        _ => return Err(ValidationError::NotAnArray),
    };
    if items.is_empty() {
        return Err(ValidationError::EmptyArray);
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect()
}

fn validate_item(index: usize, item: &Value) -> Result<Mcq, ValidationError> {
    let object = item
        .as_object()
        .ok_or(ValidationError::ItemNotObject { index })?;

    let question = non_blank_field(object, index, "question")?;

    let raw_options = object
        .get("options")
        .ok_or(ValidationError::MissingField {
            index,
            field: "options",
        })?
        .as_array()
        .ok_or(ValidationError::OptionsNotArray { index })?;

    if raw_options.len() != OPTION_COUNT {
        return Err(ValidationError::WrongOptionCount {
            index,
            found: raw_options.len(),
        });
    }

    let mut options: [String; OPTION_COUNT] = Default::default();
    for (option, (slot, raw)) in options.iter_mut().zip(raw_options).enumerate() {
        let text = raw
            .as_str()
            .ok_or(ValidationError::OptionNotString { index, option })?
            .trim();
        if text.is_empty() {
            return Err(ValidationError::BlankOption { index, option });
        }
        *slot = text.to_string();
    }

    let correct_answer = non_blank_field(object, index, "correct_answer")?.to_string();
    if !options.contains(&correct_answer) {
        return Err(ValidationError::AnswerNotInOptions { index });
    }

    Ok(Mcq::new(question.to_string(), options, correct_answer))
}

/// 读取字符串字段并去除首尾空白，空白字符串视为不合法
fn non_blank_field<'a>(
    object: &'a Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    let text = string_field(object, index, field)?.trim();
    if text.is_empty() {
        return Err(ValidationError::BlankField { index, field });
    }
    Ok(text)
}

fn string_field<'a>(
    object: &'a Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    object
        .get(field)
        .ok_or(ValidationError::MissingField { index, field })?
        .as_str()
        .ok_or(ValidationError::FieldNotString { index, field })
}
