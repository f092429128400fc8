use crate::config::CategoryGroup;
use crate::parser::{locate, LocateError};

/// The definition of `name`, from its header line through its terminator.
pub fn extract<'a>(src: &'a str, name: &str) -> Result<&'a str, LocateError> {
    let bounds = locate(src, name)?;
    Ok(&src[bounds.header_start..bounds.end])
}

/// Like [`extract`], but starting at the comment lines directly above the
/// header so they travel with the component.
pub fn extract_with_docs<'a>(src: &'a str, name: &str) -> Result<&'a str, LocateError> {
    let bounds = locate(src, name)?;
    Ok(&src[bounds.doc_start..bounds.end])
}

/// One assembled split file.
#[derive(Debug, Clone)]
pub struct CategoryFile {
    pub file_name: String,
    pub content: String,
    /// Extracted components, in manifest order.
    pub found: Vec<String>,
    /// Components that could not be extracted, with the reason.
    pub missing: Vec<LocateError>,
    pub total: usize,
}

impl CategoryFile {
    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    /// Only files with at least one component are written.
    pub fn should_write(&self) -> bool {
        !self.found.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        !self.found.is_empty() && self.found.len() < self.total
    }
}

/// Assemble a category file: the import block, the description comment and
/// every component of `group` present in `src`, in manifest order.
pub fn build_category_file(src: &str, imports: &str, group: &CategoryGroup) -> CategoryFile {
    let mut content = String::with_capacity(imports.len() + 64);
    content.push_str(imports);
    content.push('\n');
    content.push_str(&format!("// {}\n", group.description));

    let mut found = Vec::new();
    let mut missing = Vec::new();

    for name in &group.components {
        match extract_with_docs(src, name) {
            Ok(text) => {
                content.push('\n');
                content.push_str(text);
                content.push('\n');
                found.push(name.clone());
            }
            Err(e) => missing.push(e),
        }
    }

    CategoryFile {
        file_name: group.file_name.clone(),
        content,
        found,
        missing,
        total: group.components.len(),
    }
}
