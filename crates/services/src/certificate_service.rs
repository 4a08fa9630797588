use std::path::{Path, PathBuf};

use hydro_core::Clock;

use crate::error::CertificateError;

const CANVAS_WIDTH: u32 = 1200;
const CANVAS_HEIGHT: u32 = 800;
const COMPLETION_STATEMENT: &str = "Modern Hydroponics & Smart Irrigation 4.0";

/// A rendered completion certificate, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    file_name: String,
    svg: String,
}

impl Certificate {
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Writes the artifact into `dir` and returns the full path.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::Io` if the directory cannot be created or
    /// the file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, CertificateError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.svg)?;
        Ok(path)
    }
}

/// Renders completion certificates for a graduate name.
///
/// Name validation happens before any artifact exists: a blank or
/// whitespace-only name is rejected up front.
pub struct CertificateService {
    clock: Clock,
}

impl CertificateService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    /// Renders a certificate for the given name.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::EmptyName` for blank input.
    pub fn render(&self, name: &str) -> Result<Certificate, CertificateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CertificateError::EmptyName);
        }

        let issued_on = self.clock.now().format("%Y-%m-%d").to_string();
        let display_name = escape_xml(&name.to_uppercase());
        let svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <rect width="{w}" height="{h}" fill="#ffffff"/>
  <rect x="20" y="20" width="{outer_w}" height="{outer_h}" fill="none" stroke="#059669" stroke-width="40"/>
  <rect x="60" y="60" width="{inner_w}" height="{inner_h}" fill="none" stroke="#10b981" stroke-width="10"/>
  <text x="50%" y="220" text-anchor="middle" fill="#064e3b" font-family="sans-serif" font-size="80" font-weight="bold">CERTIFICATE OF COMPLETION</text>
  <text x="50%" y="300" text-anchor="middle" fill="#64748b" font-family="sans-serif" font-size="30">Awarded to:</text>
  <text x="50%" y="390" text-anchor="middle" fill="#059669" font-family="sans-serif" font-size="60" font-weight="bold">{name}</text>
  <text x="50%" y="470" text-anchor="middle" fill="#64748b" font-family="sans-serif" font-size="30">for successfully completing the full curriculum:</text>
  <text x="50%" y="530" text-anchor="middle" fill="#064e3b" font-family="sans-serif" font-size="40" font-weight="bold">{statement}</text>
  <text x="50%" y="650" text-anchor="middle" fill="#94a3b8" font-family="sans-serif" font-size="20">HydroSmart Academy - {issued_on}</text>
</svg>
"##,
            w = CANVAS_WIDTH,
            h = CANVAS_HEIGHT,
            outer_w = CANVAS_WIDTH - 40,
            outer_h = CANVAS_HEIGHT - 40,
            inner_w = CANVAS_WIDTH - 120,
            inner_h = CANVAS_HEIGHT - 120,
            name = display_name,
            statement = COMPLETION_STATEMENT,
            issued_on = issued_on,
        );

        Ok(Certificate {
            file_name: format!("hydrosmart-certificate-{}.svg", slugify(name)),
            svg,
        })
    }
}

fn slugify(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
