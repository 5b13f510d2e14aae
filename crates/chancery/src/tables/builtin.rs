//! Built-in data tables.
//!
//! These are plain Rust data so the default tables are infallible; JSON
//! documents only ever override them.

use super::BbanClass::{Alphanumeric, Digit, Upper};
use super::{BbanClass, BbanSegment, CardType, FileCategory, IbanFormat};

/// `(name, short name, prefix, length)`.
const CARD_TYPES: &[(&str, &str, &str, usize)] = &[
    ("American Express", "amex", "34", 15),
    ("Bankcard", "bankcard", "5610", 16),
    ("China UnionPay", "chinaunion", "62", 16),
    ("Diners Club Carte Blanche", "dccarte", "300", 14),
    ("Diners Club enRoute", "dcenroute", "2014", 15),
    ("Diners Club International", "dcintl", "36", 14),
    ("Diners Club United States & Canada", "dcusc", "54", 16),
    ("Discover Card", "discover", "6011", 16),
    ("InstaPayment", "instapay", "637", 16),
    ("JCB", "jcb", "3528", 16),
    ("Laser", "laser", "6304", 16),
    ("Maestro", "maestro", "5018", 16),
    ("Mastercard", "mc", "51", 16),
    ("Solo", "solo", "6334", 16),
    ("Switch", "switch", "4903", 16),
    ("Visa", "visa", "4", 16),
    ("Visa Electron", "electron", "4026", 16),
];

const FILE_EXTENSIONS: &[(&str, &[&str])] = &[
    (
        "raster",
        &[
            "bmp", "gif", "gpl", "ico", "jpeg", "psd", "png", "psp", "raw", "tiff",
        ],
    ),
    (
        "vector",
        &[
            "3dv", "amf", "awg", "ai", "cgm", "cdr", "cmx", "dxf", "e2d", "egt", "eps", "fs",
            "odg", "svg", "xar",
        ],
    ),
    (
        "3d",
        &[
            "3dmf", "3dm", "3mf", "3ds", "an8", "aoi", "blend", "cal3d", "cob", "ctm", "iob",
            "jas", "max", "mb", "mdx", "obj", "x", "x3d",
        ],
    ),
    (
        "document",
        &[
            "doc", "docx", "dot", "html", "xml", "odt", "odm", "ott", "csv", "rtf", "tex",
            "xhtml", "xps",
        ],
    ),
];

const IBAN_FORMATS: &[(&str, &[(usize, BbanClass)])] = &[
    ("BE", &[(12, Digit)]),
    ("DE", &[(18, Digit)]),
    ("ES", &[(20, Digit)]),
    ("FR", &[(10, Digit), (11, Alphanumeric), (2, Digit)]),
    ("GB", &[(4, Upper), (14, Digit)]),
    ("IT", &[(1, Upper), (10, Digit), (12, Alphanumeric)]),
    ("NL", &[(4, Upper), (10, Digit)]),
    ("PL", &[(24, Digit)]),
];

pub(super) fn card_types() -> Vec<CardType> {
    CARD_TYPES
        .iter()
        .map(|(name, short_name, prefix, length)| CardType {
            name: (*name).to_owned(),
            short_name: (*short_name).to_owned(),
            prefix: (*prefix).to_owned(),
            length: *length,
        })
        .collect()
}

pub(super) fn file_categories() -> Vec<FileCategory> {
    FILE_EXTENSIONS
        .iter()
        .map(|(name, extensions)| FileCategory {
            name: (*name).to_owned(),
            extensions: extensions.iter().map(|ext| (*ext).to_owned()).collect(),
        })
        .collect()
}

pub(super) fn iban_formats() -> Vec<IbanFormat> {
    IBAN_FORMATS
        .iter()
        .map(|(country, segments)| IbanFormat {
            country: (*country).to_owned(),
            segments: segments
                .iter()
                .map(|(count, class)| BbanSegment {
                    count: *count,
                    class: *class,
                })
                .collect(),
        })
        .collect()
}
