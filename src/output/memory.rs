use crate::output::traits::{Library, OutputResult, StoredPage};
use std::collections::BTreeMap;

/// In-memory `Library` used to drive the run loop without touching the disk
#[derive(Debug, Clone, Default)]
pub struct MemoryLibrary {
    pub texts: BTreeMap<String, String>,
    pub pages: BTreeMap<String, String>,
    pub index: Option<String>,
    pub index_writes: usize,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Library for MemoryLibrary {
    fn has_text(&self, item_id: &str) -> OutputResult<bool> {
        Ok(self.texts.contains_key(item_id))
    }

    fn save_text(&mut self, item_id: &str, text: &str) -> OutputResult<bool> {
        if self.texts.contains_key(item_id) {
            return Ok(false);
        }
        self.texts.insert(item_id.to_string(), text.to_string());
        Ok(true)
    }

    fn save_page(&mut self, slug: &str, html: &str) -> OutputResult<bool> {
        let file_name = format!("{}.html", slug);
        if self.pages.contains_key(&file_name) {
            return Ok(false);
        }
        self.pages.insert(file_name, html.to_string());
        Ok(true)
    }

    fn pages(&self) -> OutputResult<Vec<StoredPage>> {
        Ok(self
            .pages
            .iter()
            .map(|(file_name, html)| StoredPage {
                file_name: file_name.clone(),
                href: file_name.clone(),
                html: html.clone(),
            })
            .collect())
    }

    fn write_index(&mut self, html: &str) -> OutputResult<()> {
        self.index = Some(html.to_string());
        self.index_writes += 1;
        Ok(())
    }
}
