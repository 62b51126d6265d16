//! YAML export, the human-readable form of [`FullExport`]

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::export::json::FullExport;
use crate::session::Session;
use crate::storage::Backend;

pub fn export_full_yaml<W: Write>(
    backend: &dyn Backend,
    session: &Session,
    writer: &mut W,
) -> TrackerResult<()> {
    let export = FullExport::collect(backend, session)?;

    writeln!(writer, "# Expense tracker export for {}", export.owner_id)?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TrackerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OwnerId;
    use crate::services::testing::test_storage;

    #[test]
    fn test_yaml_export() {
        let (_dir, storage) = test_storage();
        let session = Session::new(OwnerId::new("me"));

        let mut output = Vec::new();
        export_full_yaml(&storage, &session, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# Expense tracker export for me"));
        assert!(text.contains("schema_version:"));

        let body: String = text.lines().filter(|l| !l.starts_with('#')).collect::<Vec<_>>().join("\n");
        let parsed: FullExport = serde_yaml::from_str(&body).unwrap();
        assert_eq!(parsed.owner_id.as_str(), "me");
    }
}
