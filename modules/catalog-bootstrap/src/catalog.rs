//! Catalog document sourcing and validation
//!
//! The catalog schema is owned by the host's catalog service; this module
//! only supplies a conforming document as an opaque string. The document
//! comes from the embedded default below or from a configured file, and is
//! structurally checked before the module ever offers it for upload so a
//! bad deployment fails at startup rather than on the first account.

use std::path::{Path, PathBuf};

use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use thiserror::Error;

/// Default catalog: one base product on a monthly evergreen plan
pub const DEFAULT_CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<catalog>
    <effectiveDate>2020-01-01T00:00:00+00:00</effectiveDate>
    <catalogName>DefaultCatalog</catalogName>
    <recurringBillingMode>IN_ADVANCE</recurringBillingMode>
    <currencies>
        <currency>USD</currency>
    </currencies>
    <products>
        <product name="Standard">
            <category>BASE</category>
        </product>
    </products>
    <rules>
        <changePolicy>
            <changePolicyCase>
                <policy>END_OF_TERM</policy>
            </changePolicyCase>
        </changePolicy>
        <cancelPolicy>
            <cancelPolicyCase>
                <policy>END_OF_TERM</policy>
            </cancelPolicyCase>
        </cancelPolicy>
    </rules>
    <plans>
        <plan name="standard-monthly">
            <product>Standard</product>
            <initialPhases>
            </initialPhases>
            <finalPhase type="EVERGREEN">
                <duration>
                    <unit>UNLIMITED</unit>
                </duration>
                <recurring>
                    <billingPeriod>MONTHLY</billingPeriod>
                    <recurringPrice>
                        <price>
                            <currency>USD</currency>
                            <value>30</value>
                        </price>
                    </recurringPrice>
                </recurring>
            </finalPhase>
        </plan>
    </plans>
    <priceLists>
        <defaultPriceList name="DEFAULT">
            <plans>
                <plan>standard-monthly</plan>
            </plans>
        </defaultPriceList>
    </priceLists>
</catalog>
"#;

#[derive(Debug, Error)]
pub enum CatalogDocumentError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("catalog document is not well-formed XML: {0}")]
    Malformed(String),

    #[error("catalog document must contain exactly one <{element}>, found {count}")]
    ElementCount { element: &'static str, count: usize },

    #[error("catalog document defines no <plan>")]
    NoPlans,
}

/// Resolve the catalog document to upload
///
/// Reads the whole file when a path is configured, otherwise uses the
/// embedded default; either way the document is validated before being
/// returned.
pub fn load_catalog(path: Option<&Path>) -> Result<String, CatalogDocumentError> {
    let xml = match path {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|source| CatalogDocumentError::Io {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => DEFAULT_CATALOG.to_string(),
    };

    validate_catalog(&xml)?;
    Ok(xml)
}

/// Structural check on a catalog document
///
/// Well-formedness plus the minimum the catalog service will accept:
/// exactly one `catalogName`, exactly one `effectiveDate`, at least one
/// `plan`. Anything deeper is the catalog service's to enforce.
pub fn validate_catalog(xml: &str) -> Result<(), CatalogDocumentError> {
    let mut reader = Reader::from_str(xml);

    let mut catalog_names = 0usize;
    let mut effective_dates = 0usize;
    let mut plans = 0usize;

    loop {
        match reader.read_event() {
            Ok(XmlEvent::Start(start)) => match start.name().as_ref() {
                b"catalogName" => catalog_names += 1,
                b"effectiveDate" => effective_dates += 1,
                b"plan" => plans += 1,
                _ => {}
            },
            Ok(XmlEvent::Eof) => break,
            Err(e) => return Err(CatalogDocumentError::Malformed(e.to_string())),
            Ok(_) => {}
        }
    }

    if catalog_names != 1 {
        return Err(CatalogDocumentError::ElementCount {
            element: "catalogName",
            count: catalog_names,
        });
    }
    if effective_dates != 1 {
        return Err(CatalogDocumentError::ElementCount {
            element: "effectiveDate",
            count: effective_dates,
        });
    }
    if plans == 0 {
        return Err(CatalogDocumentError::NoPlans);
    }

    Ok(())
}
