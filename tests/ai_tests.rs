// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use daybook::ai::{classify, decode_bill, decode_task, parse_bill, AiConfig, AiError, Route};
use daybook::models::{Priority, TodoStatus, TxType};

fn day() -> NaiveDate {
    NaiveDate::parse_from_str("2025-06-15", "%Y-%m-%d").unwrap()
}

#[test]
fn classify_routes_task_markers_to_task() {
    assert_eq!(classify("任务：买牛奶"), Route::Task);
    assert_eq!(classify("任务 紧急提交报告"), Route::Task);
    assert_eq!(classify("添加任务 洗车"), Route::Task);
    assert_eq!(classify("新建任务：复习"), Route::Task);
    assert_eq!(classify("提醒我 任务: 交房租"), Route::Task);
}

#[test]
fn classify_routes_everything_else_to_bill() {
    assert_eq!(classify("午饭花了35元"), Route::Bill);
    assert_eq!(classify("昨天打车 22"), Route::Bill);
    assert_eq!(classify(""), Route::Bill);
}

#[test]
fn classify_is_stable() {
    for _ in 0..3 {
        assert_eq!(classify("任务：买牛奶"), Route::Task);
        assert_eq!(classify("午饭花了35元"), Route::Bill);
    }
}

#[test]
fn bill_decode_applies_defaults() {
    let reply = r#"{"type":"expense","amount":35.0,"category":"餐饮-午餐"}"#;
    let t = decode_bill(reply, day()).unwrap();
    assert_eq!(t.kind, TxType::Expense);
    assert_eq!(t.amount, 35.0);
    assert_eq!(t.category, "餐饮-午餐");
    assert_eq!(t.note, "");
    assert_eq!(t.date, day());
    assert_eq!(t.id, None);
}

#[test]
fn bill_decode_strips_markdown_fence() {
    let reply = "```json\n{\"type\":\"income\",\"amount\":500,\"category\":\"其他收入-红包\",\"date\":\"2025-06-01\"}\n```";
    let t = decode_bill(reply, day()).unwrap();
    assert_eq!(t.kind, TxType::Income);
    assert_eq!(t.date, NaiveDate::parse_from_str("2025-06-01", "%Y-%m-%d").unwrap());
}

#[test]
fn bill_decode_normalizes_null_tokens() {
    let reply = r#"{"type":"expense","amount":8,"category":"交通","note":"null","date":"null"}"#;
    let t = decode_bill(reply, day()).unwrap();
    assert_eq!(t.note, "");
    assert_eq!(t.date, day());
}

#[test]
fn bill_decode_rejects_bad_payloads() {
    // Missing required amount.
    assert!(decode_bill(r#"{"type":"expense","category":"交通"}"#, day()).is_err());
    // Negative amount.
    assert!(decode_bill(r#"{"type":"expense","amount":-5,"category":"交通"}"#, day()).is_err());
    // Not JSON at all.
    assert!(decode_bill("好的，已为您记账", day()).is_err());
    // Unknown type token.
    assert!(decode_bill(r#"{"type":"transfer","amount":5,"category":"x"}"#, day()).is_err());
}

#[test]
fn task_decode_applies_defaults() {
    let reply = r#"{"title":"买牛奶"}"#;
    let item = decode_task(reply, day()).unwrap();
    assert_eq!(item.title, "买牛奶");
    assert_eq!(item.description, "");
    assert_eq!(item.status, TodoStatus::NotStarted);
    assert_eq!(item.priority, Some(Priority::Medium));
    assert_eq!(item.due_date, None);
    assert_eq!(item.tags, "");
    assert_eq!(item.date, day());
}

#[test]
fn task_decode_normalizes_null_tokens() {
    let reply =
        r#"{"title":"买牛奶","description":"null","priority":"high","due_date":"","tags":"null"}"#;
    let item = decode_task(reply, day()).unwrap();
    assert_eq!(item.description, "");
    assert_eq!(item.tags, "");
    assert_eq!(item.priority, Some(Priority::High));
    assert_eq!(item.due_date, None);
}

#[test]
fn task_decode_rejects_bad_payloads() {
    assert!(decode_task(r#"{"description":"no title"}"#, day()).is_err());
    assert!(decode_task(r#"{"title":""}"#, day()).is_err());
    assert!(decode_task(r#"{"title":"x","priority":"urgent"}"#, day()).is_err());
    assert!(decode_task(r#"{"title":"x","due_date":"next week"}"#, day()).is_err());
}

#[test]
fn network_failure_delivers_error_exactly_once() {
    // Nothing listens on the discard port; the call fails without touching
    // the network beyond loopback.
    let cfg = AiConfig {
        api_url: "http://127.0.0.1:9/chat/completions".to_string(),
        api_key: String::new(),
        model: "test".to_string(),
    };

    let rx = parse_bill(&cfg, "午饭花了35元");
    match rx.recv().unwrap() {
        Err(AiError::Network(_)) | Err(AiError::Status(_)) => {}
        other => panic!("expected a network failure, got {:?}", other.map(|t| t.category)),
    }
    // The worker sent its single result and hung up.
    assert!(rx.recv().is_err());
}
