// Word export of drafted contract text.
// Line classification (document.rs) is separate from the OOXML writer (docx.rs).

pub mod document;
pub mod docx;
pub mod handlers;

/// `NDA_<client>_<counterparty>.docx`, with spaces removed from both names.
pub fn export_file_name(client_name: &str, counterparty_name: &str) -> String {
    format!(
        "NDA_{}_{}.docx",
        client_name.replace(' ', ""),
        counterparty_name.replace(' ', "")
    )
}

/// Attachment header value. Characters that cannot appear in a quoted ASCII
/// filename are replaced with `_`.
pub fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name_strips_spaces() {
        assert_eq!(
            export_file_name("OCP", "Tech Solutions Inc."),
            "NDA_OCP_TechSolutionsInc..docx"
        );
    }

    #[test]
    fn test_content_disposition_is_ascii_safe() {
        assert_eq!(
            content_disposition("NDA_OCP_TechSolutionsInc..docx"),
            "attachment; filename=\"NDA_OCP_TechSolutionsInc..docx\""
        );
        assert_eq!(
            content_disposition(&export_file_name("Société \"Générale\"", "X")),
            "attachment; filename=\"NDA_Soci_t__G_n_rale__X.docx\""
        );
    }
}
