//! Section descriptors: which manifest key paths to walk, in which order, and
//! where their files land by default.
//!
//! A [`Layout`] is a plain ordered list consumed by one generic traversal loop
//! in the runner. Per-file exceptions live in [`crate::resolve`].

use crate::config::LayoutKind;
use crate::manifest::Manifest;
use std::path::PathBuf;

/// Wrapper key of the multi-module export.
pub const MODULES_WRAPPER: &str = "modules";
/// Wrapper key of the flat asset export.
pub const ASSETS_WRAPPER: &str = "assets";
/// Default directory for the flat export and shared icons.
pub const IMAGES_DIR: &str = "images";

/// One leaf map in the manifest and its default destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading shown while the section is processed.
    pub label: String,
    /// Key path below the layout wrapper; the last element is the category.
    pub path: Vec<String>,
    /// Default directory relative to the assets root (`/`-separated).
    pub dest_dir: String,
}

impl Section {
    /// Category name used for override lookups.
    pub fn category(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

/// Ordered sections plus the top-level key they live under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub kind: LayoutKind,
    pub wrapper: String,
    pub sections: Vec<Section>,
}

struct SectionRule {
    label: &'static str,
    path: &'static [&'static str],
    dest_dir: &'static str,
}

const SERVICE_BOOKING: &str = "service_booking";
const PAYMENT: &str = "service_booking/payment";

/// Processing checklist for the multi-module export. Order is the run order.
const MODULE_CHECKLIST: &[SectionRule] = &[
    SectionRule {
        label: "Module 3: Service Booking / Home Maintenance Categories",
        path: &["module3_service_booking", "home_maintenance_categories"],
        dest_dir: SERVICE_BOOKING,
    },
    SectionRule {
        label: "Module 3: Service Booking / Electrical Services Screen",
        path: &["module3_service_booking", "electrical_services_screen"],
        dest_dir: SERVICE_BOOKING,
    },
    SectionRule {
        label: "Module 3: Service Booking / Service Detail Screen",
        path: &["module3_service_booking", "service_detail_screen"],
        dest_dir: SERVICE_BOOKING,
    },
    SectionRule {
        label: "Module 3: Service Booking / Add-ons Screen",
        path: &["module3_service_booking", "addons_screen"],
        dest_dir: SERVICE_BOOKING,
    },
    SectionRule {
        label: "Module 3: Service Booking / Common Icons",
        path: &["module3_service_booking", "common_icons"],
        dest_dir: SERVICE_BOOKING,
    },
    SectionRule {
        label: "Common: Status Bar Icons",
        path: &["common_status_bar"],
        dest_dir: IMAGES_DIR,
    },
    SectionRule {
        label: "Common: Address Form Icons",
        path: &["common_address_form"],
        dest_dir: IMAGES_DIR,
    },
    SectionRule {
        label: "Module 3: Add Location",
        path: &["module3_add_location"],
        dest_dir: SERVICE_BOOKING,
    },
    SectionRule {
        label: "Module 3: Add Address",
        path: &["module3_add_address"],
        dest_dir: SERVICE_BOOKING,
    },
    SectionRule {
        label: "Module 3: Add Address Confirmation",
        path: &["module3_add_address_confirmation"],
        dest_dir: SERVICE_BOOKING,
    },
    SectionRule {
        label: "Module 3: Payment Cart",
        path: &["module3_payment_cart"],
        dest_dir: SERVICE_BOOKING,
    },
    SectionRule {
        label: "Module 3: Payment Method",
        path: &["module3_payment_method"],
        dest_dir: PAYMENT,
    },
    SectionRule {
        label: "Module 3: Payment Success",
        path: &["module3_payment_success"],
        dest_dir: PAYMENT,
    },
];

impl Layout {
    /// Fixed checklist for the `modules` export.
    pub fn modules() -> Self {
        let sections = MODULE_CHECKLIST
            .iter()
            .map(|rule| Section {
                label: rule.label.to_string(),
                path: rule.path.iter().map(|s| s.to_string()).collect(),
                dest_dir: rule.dest_dir.to_string(),
            })
            .collect();
        Self {
            kind: LayoutKind::Modules,
            wrapper: MODULES_WRAPPER.to_string(),
            sections,
        }
    }

    /// One section per category under `assets`, in manifest order, all to `images/`.
    pub fn flat(manifest: &Manifest) -> Self {
        let sections = manifest
            .object_at(&[ASSETS_WRAPPER])
            .map(|assets| {
                assets
                    .iter()
                    .filter(|(category, value)| {
                        let is_map = value.is_object();
                        if !is_map {
                            tracing::warn!(category = %category, "skipping non-object asset category");
                        }
                        is_map
                    })
                    .map(|(category, _)| Section {
                        label: title_case(category),
                        path: vec![category.clone()],
                        dest_dir: IMAGES_DIR.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            kind: LayoutKind::Flat,
            wrapper: ASSETS_WRAPPER.to_string(),
            sections,
        }
    }

    /// Build the layout for `kind`, resolving `Auto` from the manifest shape.
    pub fn for_manifest(kind: LayoutKind, manifest: &Manifest) -> Self {
        match kind {
            LayoutKind::Modules => Self::modules(),
            LayoutKind::Flat => Self::flat(manifest),
            LayoutKind::Auto if manifest.has_object(MODULES_WRAPPER) => Self::modules(),
            LayoutKind::Auto => Self::flat(manifest),
        }
    }

    /// Full key path of `section` from the manifest top level.
    pub fn key_path(&self, section: &Section) -> Vec<String> {
        let mut path = Vec::with_capacity(section.path.len() + 1);
        path.push(self.wrapper.clone());
        path.extend(section.path.iter().cloned());
        path
    }
}

/// `common_status_bar` -> `Common Status Bar`.
fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Split a `/`-separated relative directory into a path.
pub(crate) fn rel_dir(dir: &str) -> PathBuf {
    dir.split('/').filter(|s| !s.is_empty()).collect()
}
