//! Service provider registry transformer
//!
//! Every `META-INF/services/<interface>` file is merged separately. Provider
//! lines and the interface name in the path both go through the relocators;
//! duplicate providers are dropped, comments and blank lines ignored.

use tracing::debug;

use super::{ResourceEntry, ResourceTransformer};
use crate::driver::EntrySink;
use crate::error::Result;
use crate::relocation::{Relocator, relocate_class};

pub const SERVICES_PREFIX: &str = "META-INF/services/";

#[derive(Debug, Default)]
pub struct ServicesTransformer {
    services: Vec<(String, Vec<String>)>,
}

impl ServicesTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    fn providers_mut(&mut self, path: String) -> &mut Vec<String> {
        let idx = match self.services.iter().position(|(p, _)| *p == path) {
            Some(idx) => idx,
            None => {
                self.services.push((path, Vec::new()));
                self.services.len() - 1
            }
        };
        &mut self.services[idx].1
    }
}

impl ResourceTransformer for ServicesTransformer {
    fn name(&self) -> &'static str {
        "services"
    }

    fn claims(&self, path: &str) -> bool {
        path.strip_prefix(SERVICES_PREFIX)
            .is_some_and(|name| !name.is_empty() && !name.contains('/'))
    }

    fn consume(&mut self, entry: &ResourceEntry<'_>, relocators: &[Relocator]) -> Result<()> {
        let interface = entry.path.strip_prefix(SERVICES_PREFIX).unwrap_or(entry.path);
        let path = format!("{SERVICES_PREFIX}{}", relocate_class(relocators, interface));
        debug!(archive = entry.archive, from = entry.path, to = %path, "Merging service file");

        let text = String::from_utf8_lossy(entry.contents);
        let harvested: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| relocate_class(relocators, line))
            .collect();
        if harvested.is_empty() {
            debug!(archive = entry.archive, path = entry.path, "Service file lists no providers");
            return Ok(());
        }

        let providers = self.providers_mut(path);
        for provider in harvested {
            if !providers.contains(&provider) {
                providers.push(provider);
            }
        }
        Ok(())
    }

    fn has_content(&self) -> bool {
        !self.services.is_empty()
    }

    fn finalize(&mut self, sink: &mut dyn EntrySink) -> Result<()> {
        for (path, providers) in std::mem::take(&mut self.services) {
            let mut contents = providers.join("\n");
            contents.push('\n');
            sink.write_entry(&path, contents.as_bytes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MemorySink;

    fn consume(t: &mut ServicesTransformer, path: &str, contents: &str, relocators: &[Relocator]) {
        let entry = ResourceEntry {
            archive: "lib.jar",
            path,
            contents: contents.as_bytes(),
        };
        t.consume(&entry, relocators).unwrap();
    }

    #[test]
    fn test_claims_service_files_only() {
        let t = ServicesTransformer::new();
        assert!(t.claims("META-INF/services/java.sql.Driver"));
        assert!(!t.claims("META-INF/services/"));
        assert!(!t.claims("META-INF/services/nested/file"));
        assert!(!t.claims("META-INF/MANIFEST.MF"));
    }

    #[test]
    fn test_merges_relocates_and_dedups() {
        let relocators = vec![Relocator::new("org.foo", Some("x.foo"), &[], &[]).unwrap()];
        let mut t = ServicesTransformer::new();
        consume(
            &mut t,
            "META-INF/services/org.foo.Spi",
            "# providers\norg.foo.impl.A\n\n",
            &relocators,
        );
        consume(
            &mut t,
            "META-INF/services/org.foo.Spi",
            "org.foo.impl.A\ncom.other.B\n",
            &relocators,
        );
        consume(&mut t, "META-INF/services/java.sql.Driver", "com.db.Driver\n", &relocators);

        let mut sink = MemorySink::default();
        t.finalize(&mut sink).unwrap();
        assert_eq!(
            sink.get("META-INF/services/x.foo.Spi"),
            Some(&b"x.foo.impl.A\ncom.other.B\n"[..])
        );
        assert_eq!(
            sink.get("META-INF/services/java.sql.Driver"),
            Some(&b"com.db.Driver\n"[..])
        );
        assert!(!t.has_content());
    }

    #[test]
    fn test_comment_only_file_contributes_nothing() {
        let mut t = ServicesTransformer::new();
        consume(
            &mut t,
            "META-INF/services/java.sql.Driver",
            "# no providers\n\n   \n",
            &[],
        );
        assert!(!t.has_content());

        let mut sink = MemorySink::default();
        t.finalize(&mut sink).unwrap();
        assert!(sink.is_empty());
    }
}
