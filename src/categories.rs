// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

use crate::models::{Language, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub kind: TransactionType,
    /// Translation key for the display name.
    pub label_key: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

const fn cat(
    id: &'static str,
    kind: TransactionType,
    label_key: &'static str,
    icon: &'static str,
    color: &'static str,
) -> CategoryInfo {
    CategoryInfo {
        id,
        kind,
        label_key,
        icon,
        color,
    }
}

use TransactionType::{Expense, Income};

pub static CATEGORIES: [CategoryInfo; 14] = [
    cat("salary", Income, "salary", "cash", "#10B981"),
    cat("freelance", Income, "freelance", "laptop", "#3B82F6"),
    cat("investment", Income, "investment", "trending-up", "#8B5CF6"),
    cat("gift", Income, "gift", "gift", "#EC4899"),
    cat("other_income", Income, "otherIncome", "wallet", "#06B6D4"),
    cat("food", Expense, "food", "restaurant", "#EF4444"),
    cat("transport", Expense, "transport", "car", "#F59E0B"),
    cat("shopping", Expense, "shopping", "cart", "#8B5CF6"),
    cat("entertainment", Expense, "entertainment", "game-controller", "#EC4899"),
    cat("bills", Expense, "bills", "receipt", "#3B82F6"),
    cat("health", Expense, "health", "medkit", "#10B981"),
    cat("education", Expense, "education", "school", "#06B6D4"),
    cat("home", Expense, "home", "home", "#F97316"),
    cat("other_expense", Expense, "otherExpense", "ellipsis-horizontal", "#6B7280"),
];

pub fn lookup(id: &str) -> Option<&'static CategoryInfo> {
    CATEGORIES.iter().find(|c| c.id == id)
}

pub fn for_type(kind: TransactionType) -> impl Iterator<Item = &'static CategoryInfo> {
    CATEGORIES.iter().filter(move |c| c.kind == kind)
}

/// Known category of the given type, or that type's catch-all entry.
pub fn resolve(id: &str, kind: TransactionType) -> &'static CategoryInfo {
    let fallback = match kind {
        Income => &CATEGORIES[4],
        Expense => &CATEGORIES[13],
    };
    lookup(id).filter(|c| c.kind == kind).unwrap_or(fallback)
}

/// Display name for a category id; unknown ids are shown verbatim.
pub fn label(id: &str, language: Language) -> String {
    let Some(info) = lookup(id) else {
        return id.to_string();
    };
    let text = match (language, info.label_key) {
        (Language::En, "salary") => "Salary",
        (Language::En, "freelance") => "Freelance",
        (Language::En, "investment") => "Investment",
        (Language::En, "gift") => "Gift",
        (Language::En, "otherIncome") => "Other Income",
        (Language::En, "food") => "Food",
        (Language::En, "transport") => "Transport",
        (Language::En, "shopping") => "Shopping",
        (Language::En, "entertainment") => "Entertainment",
        (Language::En, "bills") => "Bills",
        (Language::En, "health") => "Health",
        (Language::En, "education") => "Education",
        (Language::En, "home") => "Home",
        (Language::En, "otherExpense") => "Other Expense",
        (Language::Es, "salary") => "Salario",
        (Language::Es, "freelance") => "Freelance",
        (Language::Es, "investment") => "Inversión",
        (Language::Es, "gift") => "Regalo",
        (Language::Es, "otherIncome") => "Otros Ingresos",
        (Language::Es, "food") => "Comida",
        (Language::Es, "transport") => "Transporte",
        (Language::Es, "shopping") => "Compras",
        (Language::Es, "entertainment") => "Entretenimiento",
        (Language::Es, "bills") => "Facturas",
        (Language::Es, "health") => "Salud",
        (Language::Es, "education") => "Educación",
        (Language::Es, "home") => "Hogar",
        (Language::Es, "otherExpense") => "Otros Gastos",
        _ => info.label_key,
    };
    text.to_string()
}
