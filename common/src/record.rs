//! 画像レコード管理
//!
//! アップロードされた画像と解析結果の組（ImageRecord）を保持し、
//! フォルダ単位のグループ化を提供する。ネイティブクライアントとWeb(WASM)で共有。

use crate::error::{Error, Result};
use crate::types::AnalysisResult;
use std::collections::HashMap;

/// 相対パスを持たない画像のグループキー
pub const UNGROUPED: &str = "Ungrouped";

/// レコードID（ストア内で一意、再利用しない）
pub type RecordId = u64;

/// 相対パスから (表示名, フォルダキー) を導出
///
/// `A/B/x.jpg` → (`x.jpg`, `A/B`)。相対パスがない、またはディレクトリ部分が
/// ない場合のフォルダキーは [`UNGROUPED`]。
pub fn split_relative_path(file_name: &str, relative_path: Option<&str>) -> (String, String) {
    let Some(path) = relative_path.filter(|p| !p.is_empty()) else {
        return (file_name.to_string(), UNGROUPED.to_string());
    };

    let mut parts: Vec<&str> = path.split('/').collect();
    let display_name = match parts.pop() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => file_name.to_string(),
    };

    let folder_key = if parts.is_empty() {
        UNGROUPED.to_string()
    } else {
        parts.join("/")
    };

    (display_name, folder_key)
}

/// アップロードされた1枚の画像（リクエスト完了まで保持）
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    /// フォルダ選択時の相対パス（例: `Trip/Day1/x.jpg`）
    pub relative_path: Option<String>,
    /// ローカルで表示できるプレビュー参照（ブラウザではObject URL、CLIではファイルパス）
    pub preview: String,
    /// 送信用の Data URL
    pub data_url: String,
}

impl UploadedFile {
    pub fn display_name(&self) -> String {
        split_relative_path(&self.file_name, self.relative_path.as_deref()).0
    }

    pub fn folder_key(&self) -> String {
        split_relative_path(&self.file_name, self.relative_path.as_deref()).1
    }
}

/// 表示用レコード（画像 + 解析結果）
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub id: RecordId,
    pub file_name: String,
    pub folder_key: String,
    pub preview: String,
    pub analysis: Option<AnalysisResult>,
}

/// フォルダ単位のグループ
#[derive(Debug, Clone, PartialEq)]
pub struct FolderGroup {
    pub key: String,
    pub records: Vec<ImageRecord>,
}

/// レコードの集合
///
/// 追加順を保持する。解析結果は未設定からの一度きりの設定のみ許可し、
/// 設定後は書き換えない。変更のたびに `version` が進む。
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<ImageRecord>,
    next_id: RecordId,
    version: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// レコードを末尾に追加（Data URLは保持しない）
    pub fn append(&mut self, file: &UploadedFile, analysis: Option<AnalysisResult>) -> RecordId {
        let (file_name, folder_key) =
            split_relative_path(&file.file_name, file.relative_path.as_deref());

        let id = self.next_id;
        self.next_id += 1;
        self.version += 1;

        self.records.push(ImageRecord {
            id,
            file_name,
            folder_key,
            preview: file.preview.clone(),
            analysis,
        });

        id
    }

    /// 解析待ちのレコードに結果を設定
    pub fn update_analysis(&mut self, id: RecordId, analysis: AnalysisResult) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Error::UnknownRecord(id))?;

        if record.analysis.is_some() {
            return Err(Error::AlreadyAnalyzed(id));
        }

        record.analysis = Some(analysis);
        self.version += 1;
        Ok(())
    }

    /// レコードを削除（他のレコードの順序は変わらない）
    pub fn remove(&mut self, id: RecordId) -> Result<ImageRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::UnknownRecord(id))?;

        self.version += 1;
        Ok(self.records.remove(index))
    }

    pub fn get(&self, id: RecordId) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// フォルダキーでグループ化
    ///
    /// グループの順序はキーの初出順、グループ内は追加順
    pub fn groups(&self) -> Vec<FolderGroup> {
        let mut groups: Vec<FolderGroup> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for record in &self.records {
            match index.get(record.folder_key.as_str()) {
                Some(&i) => groups[i].records.push(record.clone()),
                None => {
                    index.insert(record.folder_key.as_str(), groups.len());
                    groups.push(FolderGroup {
                        key: record.folder_key.clone(),
                        records: vec![record.clone()],
                    });
                }
            }
        }

        groups
    }

    /// 指定フォルダのグループ
    pub fn group(&self, key: &str) -> Option<FolderGroup> {
        self.groups().into_iter().find(|g| g.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, relative_path: Option<&str>) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            relative_path: relative_path.map(str::to_string),
            preview: format!("blob:{}", name),
            data_url: "data:image/png;base64,AAAA".to_string(),
        }
    }

    fn analysis(title: &str) -> AnalysisResult {
        AnalysisResult {
            title: title.to_string(),
            description: "d".to_string(),
            keywords: "a,b".to_string(),
            category_id: Some(5),
        }
    }

    // =============================================
    // split_relative_path テスト
    // =============================================

    #[test]
    fn test_split_relative_path_nested() {
        let (name, key) = split_relative_path("x.jpg", Some("Trip/Day1/x.jpg"));
        assert_eq!(name, "x.jpg");
        assert_eq!(key, "Trip/Day1");
    }

    #[test]
    fn test_split_relative_path_none() {
        let (name, key) = split_relative_path("x.jpg", None);
        assert_eq!(name, "x.jpg");
        assert_eq!(key, UNGROUPED);
    }

    #[test]
    fn test_split_relative_path_empty_or_bare() {
        assert_eq!(split_relative_path("x.jpg", Some("")).1, UNGROUPED);
        assert_eq!(split_relative_path("x.jpg", Some("x.jpg")).1, UNGROUPED);
    }

    #[test]
    fn test_same_folder_same_group() {
        assert_eq!(file("x.jpg", Some("A/x.jpg")).folder_key(), "A");
        assert_eq!(file("y.jpg", Some("A/y.jpg")).folder_key(), "A");
        assert_eq!(file("z.jpg", None).folder_key(), UNGROUPED);
    }

    // =============================================
    // RecordStore テスト
    // =============================================

    #[test]
    fn test_append_keeps_order_and_drops_payload() {
        let mut store = RecordStore::new();
        let a = store.append(&file("a.jpg", None), Some(analysis("A")));
        let b = store.append(&file("b.jpg", None), Some(analysis("B")));

        assert_ne!(a, b);
        let names: Vec<&str> = store.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
        assert_eq!(store.get(a).unwrap().preview, "blob:a.jpg");
    }

    #[test]
    fn test_remove_only_target() {
        let mut store = RecordStore::new();
        let a = store.append(&file("a.jpg", None), None);
        let b = store.append(&file("b.jpg", None), None);
        let c = store.append(&file("c.jpg", None), None);

        let removed = store.remove(b).unwrap();
        assert_eq!(removed.file_name, "b.jpg");
        assert_eq!(store.len(), 2);
        assert!(store.get(a).is_some());
        assert!(store.get(c).is_some());
        assert!(store.get(b).is_none());
    }

    #[test]
    fn test_remove_unknown() {
        let mut store = RecordStore::new();
        assert!(matches!(store.remove(42), Err(Error::UnknownRecord(42))));
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut store = RecordStore::new();
        let a = store.append(&file("a.jpg", None), None);
        store.remove(a).unwrap();
        let b = store.append(&file("b.jpg", None), None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_version_bumps_on_mutation() {
        let mut store = RecordStore::new();
        assert_eq!(store.version(), 0);
        let id = store.append(&file("a.jpg", None), None);
        assert_eq!(store.version(), 1);
        store.remove(id).unwrap();
        assert_eq!(store.version(), 2);
        assert!(store.remove(id).is_err());
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_update_analysis_once() {
        let mut store = RecordStore::new();
        let id = store.append(&file("a.jpg", None), None);

        store.update_analysis(id, analysis("A")).unwrap();
        assert_eq!(store.get(id).unwrap().analysis.as_ref().unwrap().title, "A");
        assert_eq!(store.version(), 2);

        assert!(matches!(
            store.update_analysis(id, analysis("B")),
            Err(Error::AlreadyAnalyzed(_))
        ));
        assert_eq!(store.get(id).unwrap().analysis.as_ref().unwrap().title, "A");
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_update_analysis_unknown() {
        let mut store = RecordStore::new();
        assert!(matches!(
            store.update_analysis(7, analysis("A")),
            Err(Error::UnknownRecord(7))
        ));
    }

    #[test]
    fn test_groups_first_appearance_order() {
        let mut store = RecordStore::new();
        store.append(&file("x.jpg", Some("A/x.jpg")), Some(analysis("1")));
        store.append(&file("u.jpg", None), Some(analysis("2")));
        store.append(&file("y.jpg", Some("A/y.jpg")), Some(analysis("3")));
        store.append(&file("z.jpg", Some("B/C/z.jpg")), Some(analysis("4")));

        let groups = store.groups();
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["A", UNGROUPED, "B/C"]);

        let a_titles: Vec<&str> = groups[0]
            .records
            .iter()
            .map(|r| r.analysis.as_ref().unwrap().title.as_str())
            .collect();
        assert_eq!(a_titles, vec!["1", "3"]);
    }

    #[test]
    fn test_group_lookup() {
        let mut store = RecordStore::new();
        store.append(&file("x.jpg", Some("A/x.jpg")), None);
        assert_eq!(store.group("A").unwrap().records.len(), 1);
        assert!(store.group("missing").is_none());
    }
}
