//! Image Analysis Common Library
//!
//! サーバ・CLIクライアント・Web(WASM)で共有される型とユーティリティ

pub mod types;
pub mod category;
pub mod error;
pub mod prompts;
pub mod parser;
pub mod data_url;
pub mod record;
pub mod export;

pub use types::{AnalysisResult, AnalyzeRequest, ErrorBody};
pub use category::{Category, CATEGORIES, category_label, category_name};
pub use error::{Error, Result};
pub use parser::{normalize_keywords, parse_labelled_response};
pub use data_url::{describe_payload, encode_data_url};
pub use record::{FolderGroup, ImageRecord, RecordId, RecordStore, UploadedFile, UNGROUPED};
pub use export::csv::{build_csv, build_store_csv, csv_file_name, escape_field, CSV_HEADERS};
