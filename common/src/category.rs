//! カテゴリ分類マスタ
//!
//! モデルに分類の基準として渡す固定のカテゴリ一覧（ID + 名称）。
//! アプリケーションの状態ではなく定数の参照データとして扱う。

use serde::Serialize;

/// カテゴリ（ID + 名称）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: u32,
    pub name: &'static str,
}

/// '1.Adobe-Category' データセット
pub const CATEGORIES: &[Category] = &[
    Category { id: 1, name: "Animals" },
    Category { id: 2, name: "Architecture" },
    Category { id: 3, name: "Business" },
    Category { id: 4, name: "Drinks" },
    Category { id: 5, name: "Nature" },
    Category { id: 6, name: "Emotions" },
    Category { id: 7, name: "Food" },
    Category { id: 8, name: "Graphic" },
    Category { id: 9, name: "Hobbies" },
    Category { id: 10, name: "Industry" },
    Category { id: 11, name: "Landscape" },
    Category { id: 12, name: "Lifestyle" },
    Category { id: 13, name: "People" },
    Category { id: 14, name: "Plants" },
    Category { id: 15, name: "Culture" },
    Category { id: 16, name: "Science" },
    Category { id: 17, name: "Social Issues" },
    Category { id: 18, name: "Sports" },
    Category { id: 19, name: "Technology" },
    Category { id: 20, name: "Transport" },
    Category { id: 21, name: "Travel" },
];

/// IDからカテゴリ名を取得
pub fn category_name(id: u32) -> Option<&'static str> {
    CATEGORIES.iter().find(|c| c.id == id).map(|c| c.name)
}

/// 表示用ラベル（例: `5 (Nature)`）
///
/// マスタにないIDはIDのみ、未設定は空文字
pub fn category_label(id: Option<u32>) -> String {
    match id {
        Some(id) => match category_name(id) {
            Some(name) => format!("{} ({})", id, name),
            None => id.to_string(),
        },
        None => String::new(),
    }
}

/// システムメッセージに埋め込むJSON配列
///
/// `[{"id":1,"name":"Animals"},...]` 形式（空白なし）
pub fn taxonomy_json() -> String {
    // 固定データのシリアライズは失敗しない
    serde_json::to_string(CATEGORIES).unwrap_or_else(|_| "[]".to_string())
}
