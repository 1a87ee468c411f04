// Copyright (c) 2025 Daybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use daybook::db::Store;
use daybook::models::{Transaction, TxType};
use daybook::stats::{category_stats, daily_summaries, monthly_sum};

fn add(store: &Store, kind: TxType, amount: f64, category: &str, day: &str) {
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
    store
        .add_transaction(&Transaction::new(kind, amount, category, "", date))
        .unwrap();
}

#[test]
fn monthly_sum_is_zero_without_rows() {
    let store = Store::open_in_memory().unwrap();
    assert_eq!(monthly_sum(&store, TxType::Expense, "2025-06").unwrap(), 0.0);
}

#[test]
fn monthly_sum_filters_type_and_month() {
    let store = Store::open_in_memory().unwrap();
    add(&store, TxType::Expense, 30.0, "餐饮", "2025-06-01");
    add(&store, TxType::Expense, 20.0, "交通", "2025-06-15");
    add(&store, TxType::Income, 500.0, "职业收入", "2025-06-10");
    add(&store, TxType::Expense, 99.0, "餐饮", "2025-07-01");

    assert_eq!(monthly_sum(&store, TxType::Expense, "2025-06").unwrap(), 50.0);
    assert_eq!(monthly_sum(&store, TxType::Income, "2025-06").unwrap(), 500.0);
}

#[test]
fn daily_summaries_sum_income_and_expense_per_date() {
    let store = Store::open_in_memory().unwrap();
    add(&store, TxType::Expense, 10.0, "餐饮", "2025-06-01");
    add(&store, TxType::Expense, 5.0, "交通", "2025-06-01");
    add(&store, TxType::Income, 100.0, "职业收入", "2025-06-01");
    add(&store, TxType::Expense, 7.0, "餐饮", "2025-06-03");

    let days = daily_summaries(&store, "2025-06").unwrap();
    assert_eq!(days.len(), 2);

    let first = &days["2025-06-01"];
    assert_eq!(first.income, 100.0);
    assert_eq!(first.expense, 15.0);

    let third = &days["2025-06-03"];
    assert_eq!(third.income, 0.0);
    assert_eq!(third.expense, 7.0);
}

#[test]
fn category_stats_group_by_parent_segment() {
    let store = Store::open_in_memory().unwrap();
    add(&store, TxType::Expense, 100.0, "餐饮-快餐", "2025-06-02");
    add(&store, TxType::Expense, 200.0, "餐饮-快餐", "2025-06-05");
    add(&store, TxType::Expense, 100.0, "交通", "2025-06-09");

    let stats = category_stats(&store, "2025-06").unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].category, "餐饮");
    assert_eq!(stats[0].amount, 300.0);
    assert_eq!(stats[0].percentage, 75.0);
    assert_eq!(stats[1].category, "交通");
    assert_eq!(stats[1].amount, 100.0);
    assert_eq!(stats[1].percentage, 25.0);
}

#[test]
fn category_stats_empty_when_month_has_no_expense() {
    let store = Store::open_in_memory().unwrap();
    // Income alone must not produce stats; the share division is undefined.
    add(&store, TxType::Income, 1000.0, "职业收入-工资", "2025-06-02");
    assert!(category_stats(&store, "2025-06").unwrap().is_empty());
}

#[test]
fn category_stats_ties_keep_insertion_order() {
    let store = Store::open_in_memory().unwrap();
    add(&store, TxType::Expense, 50.0, "娱乐-电影", "2025-06-02");
    add(&store, TxType::Expense, 50.0, "购物-服饰", "2025-06-03");
    add(&store, TxType::Expense, 80.0, "居住-房租", "2025-06-04");

    let stats = category_stats(&store, "2025-06").unwrap();
    let names: Vec<&str> = stats.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, ["居住", "娱乐", "购物"]);
}

#[test]
fn percentages_cover_the_whole_month() {
    let store = Store::open_in_memory().unwrap();
    add(&store, TxType::Expense, 12.3, "餐饮-早餐", "2025-06-01");
    add(&store, TxType::Expense, 45.6, "交通-地铁", "2025-06-02");
    add(&store, TxType::Expense, 78.9, "医疗-药品", "2025-06-03");

    let total: f64 = category_stats(&store, "2025-06")
        .unwrap()
        .iter()
        .map(|s| s.percentage)
        .sum();
    assert!((total - 100.0).abs() < 1e-9);
}
