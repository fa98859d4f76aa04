//! # umlgen Bench
//!
//! Synthetic model fixtures for umlgen performance testing.

use std::fmt::Write;

/// Shape of a synthetic model.
#[derive(Debug, Clone, Copy)]
pub struct ModelShape {
    /// Number of packages below the model root.
    pub packages: usize,
    /// Classes per package.
    pub classes: usize,
    /// Private attributes per class.
    pub attributes: usize,
}

impl Default for ModelShape {
    fn default() -> Self {
        Self {
            packages: 8,
            classes: 16,
            attributes: 6,
        }
    }
}

/// Builds a model document with the given shape.
///
/// Every package holds one interface realized by all of its classes, and
/// every class references the first class of the previous package so that
/// imports are exercised.
#[must_use]
pub fn synthetic_model_xml(shape: ModelShape) -> String {
    let mut xml = String::from("<model name=\"Bench\" author=\"bench\">\n");

    for p in 0..shape.packages {
        let _ = writeln!(xml, "  <package name=\"Pkg{p}\">");
        let _ = writeln!(
            xml,
            "    <interface id=\"i{p}\" name=\"Service{p}\"><operation name=\"run\"><parameter type=\"int\" direction=\"return\"/></operation></interface>"
        );

        for c in 0..shape.classes {
            let _ = writeln!(
                xml,
                "    <class id=\"c{p}_{c}\" name=\"Entity{c}\" stereotype=\"countable\">"
            );
            for a in 0..shape.attributes {
                let _ = writeln!(
                    xml,
                    "      <attribute name=\"field_{a}\" type=\"string\" visibility=\"private\"/>"
                );
            }
            if p > 0 {
                let _ = writeln!(
                    xml,
                    "      <attribute name=\"peer\" typeRef=\"c{}_0\" visibility=\"private\"/>",
                    p - 1
                );
            }
            xml.push_str("    </class>\n");
            let _ = writeln!(xml, "    <realization source=\"c{p}_{c}\" target=\"i{p}\"/>");
        }

        xml.push_str("  </package>\n");
    }

    xml.push_str("</model>\n");
    xml
}
