// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::mpsc;
use std::thread;
use thiserror::Error;
use tracing::debug;

use crate::models::{Priority, TodoItem, TodoStatus, Transaction, TxType};
use crate::utils::{http_client, today};

const DEFAULT_API_URL: &str = "https://api.deepseek.com/chat/completions";
const DEFAULT_MODEL: &str = "deepseek-chat";

/// Where a piece of free text should be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Bill,
    Task,
}

/// Pure and stable: the same input always takes the same route.
pub fn classify(text: &str) -> Route {
    const TASK_PREFIXES: [&str; 4] = ["任务", "添加任务", "新建任务", "创建任务"];
    const TASK_MARKERS: [&str; 2] = ["任务：", "任务:"];

    let t = text.trim().to_lowercase();
    if TASK_PREFIXES.iter().any(|p| t.starts_with(p))
        || TASK_MARKERS.iter().any(|m| t.contains(m))
    {
        Route::Task
    } else {
        Route::Bill
    }
}

/// Reasons a pipeline call can fail. Exactly one of these (or a success) is
/// delivered per call.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("网络连接失败: {0}")]
    Network(String),
    #[error("AI 服务异常: {0}")]
    Status(u16),
    #[error("AI 返回内容为空")]
    EmptyReply,
    #[error("AI 解析数据失败: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl AiConfig {
    /// Credential and endpoint come from the environment; the key is
    /// supplied out-of-band.
    pub fn from_env() -> Self {
        AiConfig {
            api_url: env::var("DAYBOOK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: env::var("DAYBOOK_API_KEY").unwrap_or_default(),
            model: env::var("DAYBOOK_API_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}

/// Parse free text into a transient Transaction on a background worker. The
/// returned channel delivers exactly one result; the value is not persisted.
pub fn parse_bill(cfg: &AiConfig, text: &str) -> mpsc::Receiver<Result<Transaction, AiError>> {
    let cfg = cfg.clone();
    let text = text.to_string();
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let now = today();
        let result =
            complete(&cfg, bill_prompt(&text, now)).and_then(|reply| decode_bill(&reply, now));
        // Caller may have dropped the receiver; the send stays exactly-once.
        let _ = sender.send(result);
    });
    receiver
}

/// Parse free text into a transient TodoItem on a background worker.
pub fn parse_task(cfg: &AiConfig, text: &str) -> mpsc::Receiver<Result<TodoItem, AiError>> {
    let cfg = cfg.clone();
    let text = text.to_string();
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let now = today();
        let result =
            complete(&cfg, task_prompt(&text, now)).and_then(|reply| decode_task(&reply, now));
        let _ = sender.send(result);
    });
    receiver
}

/// One chat-completion round trip; returns the model's reply text.
fn complete(cfg: &AiConfig, prompt: String) -> Result<String, AiError> {
    let client = http_client().map_err(|e| AiError::Network(e.to_string()))?;
    let body = ChatRequest {
        model: cfg.model.clone(),
        messages: vec![ChatMessage {
            role: "user",
            content: prompt,
        }],
    };

    debug!(url = %cfg.api_url, model = %cfg.model, "ai request");
    let resp = client
        .post(&cfg.api_url)
        .bearer_auth(&cfg.api_key)
        .json(&body)
        .send()
        .map_err(|e| AiError::Network(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(AiError::Status(status.as_u16()));
    }

    let envelope: ChatResponse = resp.json().map_err(|e| AiError::Decode(e.to_string()))?;
    let content = envelope
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .unwrap_or_default();
    if content.trim().is_empty() {
        return Err(AiError::EmptyReply);
    }
    Ok(content)
}

fn bill_prompt(text: &str, today: NaiveDate) -> String {
    format!(
        "你是一个智能记账助手。今天是 {today}。\n\n\
         请从用户输入中提取记账信息：\"{text}\"\n\n\
         ## 分类参考：\n\
         【支出类】\n\
         - 餐饮-早餐/午餐/晚餐/外卖/饮料/零食\n\
         - 交通-公交/地铁/打车/加油/停车\n\
         - 购物-服饰/日用品/电子产品/化妆品\n\
         - 娱乐-电影/游戏/KTV/运动\n\
         - 居住-房租/水电/燃气/物业\n\
         - 医疗-药品/挂号/体检\n\
         - 教育-书籍/课程/培训\n\
         - 人情-红包/礼物/请客\n\
         - 其他支出\n\n\
         【收入类】\n\
         - 职业收入-工资/奖金/兼职\n\
         - 其他收入-红包/退款/利息\n\n\
         ## 日期解析规则：\n\
         - \"昨天\" → 昨日日期\n\
         - \"前天\" → 前日日期\n\
         - \"上周X\" → 计算对应日期\n\
         - \"X月X日\" → 当年对应日期\n\
         - 未提及日期 → 使用今天 {today}\n\n\
         ## 返回格式（纯JSON，不要markdown）：\n\
         {{\n\
           \"type\": \"income\" 或 \"expense\",\n\
           \"amount\": 数字金额,\n\
           \"category\": \"主类-子类\",\n\
           \"note\": \"简短备注\",\n\
           \"date\": \"yyyy-MM-dd格式日期\"\n\
         }}\n\n\
         注意：只返回JSON对象，不要包含```或任何解释文字。"
    )
}

fn task_prompt(text: &str, today: NaiveDate) -> String {
    format!(
        "你是一个任务管理助手。今天是 {today}。\n\n\
         请从用户输入中提取任务信息：\"{text}\"\n\n\
         ## 优先级判断规则：\n\
         - high (高): 包含\"紧急\"、\"重要\"、\"马上\"、\"立刻\"、\"赶紧\"、\"今天必须\"等词\n\
         - medium (中): 普通任务，没有特别紧急或不重要的暗示\n\
         - low (低): 包含\"有空\"、\"以后\"、\"不急\"、\"闲了\"、\"想起来\"等词\n\n\
         ## 截止日期解析规则：\n\
         - \"今天\" → {today}\n\
         - \"明天\" → 明日日期\n\
         - \"后天\" → 后日日期\n\
         - \"下周X\" → 计算对应日期\n\
         - \"X月X日\" → 当年对应日期\n\
         - 未提及日期 → 留空\n\n\
         ## 返回格式（纯JSON，不要markdown）：\n\
         {{\n\
           \"title\": \"任务标题\",\n\
           \"description\": \"任务描述或留空\",\n\
           \"priority\": \"high/medium/low\",\n\
           \"due_date\": \"yyyy-MM-dd格式或留空\",\n\
           \"tags\": \"标签用逗号分隔或留空\"\n\
         }}\n\n\
         注意：只返回JSON对象，不要包含```或任何解释文字。"
    )
}

/// Remove a markdown code fence some models wrap around the JSON.
fn strip_code_fence(content: &str) -> String {
    content.replace("```json", "").replace("```", "").trim().to_string()
}

/// Collapse a missing field or a literal "null" token to the empty string.
fn clean_text(field: Option<String>) -> String {
    match field {
        Some(s) if s != "null" => s,
        _ => String::new(),
    }
}

#[derive(Deserialize)]
struct BillPayload {
    #[serde(rename = "type")]
    kind: TxType,
    amount: f64,
    category: String,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

/// Decode the model's bill JSON. Missing note defaults to empty, missing
/// date to today; a negative amount or bad date is a decode failure.
pub fn decode_bill(reply: &str, today: NaiveDate) -> Result<Transaction, AiError> {
    let payload: BillPayload = serde_json::from_str(&strip_code_fence(reply))
        .map_err(|e| AiError::Decode(e.to_string()))?;

    if !payload.amount.is_finite() || payload.amount < 0.0 {
        return Err(AiError::Decode(format!("金额无效: {}", payload.amount)));
    }

    let date = match clean_text(payload.date) {
        s if s.is_empty() => today,
        s => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| AiError::Decode(format!("日期无效: {s}")))?,
    };

    Ok(Transaction {
        id: None,
        kind: payload.kind,
        amount: payload.amount,
        category: payload.category,
        note: clean_text(payload.note),
        date,
    })
}

#[derive(Deserialize)]
struct TaskPayload {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    tags: Option<String>,
}

/// Decode the model's task JSON into a not-yet-persisted item created today.
pub fn decode_task(reply: &str, today: NaiveDate) -> Result<TodoItem, AiError> {
    let payload: TaskPayload = serde_json::from_str(&strip_code_fence(reply))
        .map_err(|e| AiError::Decode(e.to_string()))?;

    if payload.title.is_empty() {
        return Err(AiError::Decode("任务标题为空".to_string()));
    }

    let priority = match clean_text(payload.priority) {
        s if s.is_empty() => Priority::Medium,
        s => Priority::parse(&s).ok_or_else(|| AiError::Decode(format!("优先级无效: {s}")))?,
    };

    let due_date = match clean_text(payload.due_date) {
        s if s.is_empty() => None,
        s => Some(
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|_| AiError::Decode(format!("截止日期无效: {s}")))?,
        ),
    };

    Ok(TodoItem {
        id: None,
        title: payload.title,
        description: clean_text(payload.description),
        status: TodoStatus::NotStarted,
        priority: Some(priority),
        due_date,
        tags: clean_text(payload.tags),
        date: today,
        created_at: None,
        assignee: None,
        attachment: None,
    })
}
