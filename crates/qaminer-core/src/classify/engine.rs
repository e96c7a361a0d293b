use crate::layout::DocumentLines;
use crate::variants::{ReportVariant, VariantRegistry};

/// Pick the first registered variant whose identifiers are all present.
///
/// `None` means the document is not a supported report; that is an
/// expected outcome, not an error.
pub fn classify<'r>(
    doc: &DocumentLines,
    registry: &'r VariantRegistry,
) -> Option<&'r dyn ReportVariant> {
    registry.iter().find(|variant| is_match(doc, *variant))
}

/// Whether every identifier of `variant` is present in `doc`.
pub fn is_match(doc: &DocumentLines, variant: &dyn ReportVariant) -> bool {
    variant.identifiers().iter().all(|id| id.is_present(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QaError;
    use crate::model::RawFields;
    use crate::normalize::Column;
    use crate::variants::{ExtractContext, Identifier};

    struct Synthetic {
        name: &'static str,
        identifiers: &'static [Identifier],
    }

    impl ReportVariant for Synthetic {
        fn report_type(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "synthetic test variant"
        }

        fn identifiers(&self) -> &[Identifier] {
            self.identifiers
        }

        fn columns(&self) -> &[Column] {
            &[]
        }

        fn extract(
            &self,
            _doc: &DocumentLines,
            _ctx: &mut ExtractContext,
        ) -> Result<RawFields, QaError> {
            Ok(RawFields::new())
        }
    }

    const BROAD: Synthetic = Synthetic {
        name: "broad",
        identifiers: &[Identifier::Line("Notes")],
    };

    const NARROW: Synthetic = Synthetic {
        name: "narrow",
        identifiers: &[Identifier::Line("Notes"), Identifier::Substring("ArcCHECK")],
    };

    fn doc(lines: &[&str]) -> DocumentLines {
        lines.iter().copied().collect()
    }

    #[test]
    fn test_unclassified() {
        let mut registry = VariantRegistry::new();
        registry.register(NARROW);
        assert!(classify(&doc(&["nothing here"]), &registry).is_none());
    }

    #[test]
    fn test_empty_registry() {
        assert!(classify(&doc(&["Notes"]), &VariantRegistry::new()).is_none());
    }

    #[test]
    fn test_order_matters_only_when_both_match() {
        let both = doc(&["Notes", "ArcCHECK 1220"]);
        let only_broad = doc(&["Notes"]);

        let mut narrow_first = VariantRegistry::new();
        narrow_first.register(NARROW).register(BROAD);
        let mut broad_first = VariantRegistry::new();
        broad_first.register(BROAD).register(NARROW);

        assert_eq!(classify(&both, &narrow_first).unwrap().report_type(), "narrow");
        assert_eq!(classify(&both, &broad_first).unwrap().report_type(), "broad");

        assert_eq!(classify(&only_broad, &narrow_first).unwrap().report_type(), "broad");
        assert_eq!(classify(&only_broad, &broad_first).unwrap().report_type(), "broad");
    }

    #[test]
    fn test_exact_line_required() {
        let mut registry = VariantRegistry::new();
        registry.register(BROAD);
        assert!(classify(&doc(&["Notes:"]), &registry).is_none());
    }
}
