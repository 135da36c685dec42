#![forbid(unsafe_code)]

//! Project records shown in the detail modal.
//!
//! Each project is identified by a small integer id (the `data-project-id`
//! attribute on its slide). The catalog is either the built-in set or a JSON
//! array of entries:
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "title": "Personal Portfolio V2.0",
//!     "description": "…",
//!     "image": "Images/projects/V2.0.png",
//!     "tech_stack": ["HTML5", "CSS3"],
//!     "demo_url": "https://example.net",
//!     "code_url": "https://github.com/…"
//!   }
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Identifier of one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u32);

impl ProjectId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl core::str::FromStr for ProjectId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Everything the detail view shows about one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    /// Image path relative to the site root.
    pub image: String,
    /// Technology names, in display order.
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
}

impl ProjectRecord {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
            tech_stack: Vec::new(),
            demo_url: None,
            code_url: None,
        }
    }

    #[must_use]
    pub fn tech<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tech_stack.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn demo(mut self, url: impl Into<String>) -> Self {
        self.demo_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn code(mut self, url: impl Into<String>) -> Self {
        self.code_url = Some(url.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: ProjectId,
    #[serde(flatten)]
    record: ProjectRecord,
}

/// Errors from loading a catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Two entries share an id.
    DuplicateId(ProjectId),
    /// An entry has a blank title.
    EmptyTitle(ProjectId),
}

impl core::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::DuplicateId(id) => write!(f, "duplicate project id: {id}"),
            Self::EmptyTitle(id) => write!(f, "project {id} has an empty title"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::DuplicateId(_) | Self::EmptyTitle(_) => None,
        }
    }
}

/// Lookup table from [`ProjectId`] to [`ProjectRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCatalog {
    entries: BTreeMap<ProjectId, ProjectRecord>,
}

impl ProjectCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The projects published on the site.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            ProjectId(1),
            ProjectRecord::new(
                "Personal Portfolio V2.0",
                "A responsive portfolio website showcasing my skills, projects, Certificates, \
                 Experience and Contact built with modern web technologies. This is the second \
                 iteration of my portfolio with improved design, performance, and user \
                 experience.",
                "Images/projects/V2.0.png",
            )
            .tech(["HTML5", "CSS3", "Java Script", "Bootstrap"])
            .demo("https://mostafa-zahran.netlify.app")
            .code("https://github.com/Mostafa-Zhran/V2.0-Portfolio"),
        );
        catalog.insert(
            ProjectId(2),
            ProjectRecord::new(
                "Sales Management Desktop App",
                "A desktop-based system designed to manage products, categories, customers, \
                 sales, and orders efficiently. With features like inventory tracking, detailed \
                 sales and customer management, the app simplifies daily operations and helps \
                 businesses stay organized. Its user-friendly interface makes it easy to \
                 navigate between products, groups, sales, and orders , ensuring smooth \
                 workflow and better decision-making.",
                "Images/projects/Sales App.png",
            )
            .tech([
                "C#",
                "Windows Form",
                ".Net Core",
                "SQL Server",
                "ADO.net",
                "Dapper",
            ])
            .code("https://github.com/Mostafa-Zhran/Sales-Management-System-Desktop-app.git"),
        );
        catalog.insert(
            ProjectId(3),
            ProjectRecord::new(
                "Breast Cancer Prediction System",
                "Our Breast Cancer Prediction System uses validated machine-learning models to \
                 analyze clinical and imaging data and provide clear risk scores and \
                 explanations to support early detection and care decisions. It\u{2019}s \
                 designed as a clinical decision-support tool \u{2014} not a replacement for \
                 professional diagnosis and screening.",
                "Images/projects/Cancer detection.png",
            )
            .tech([
                "Flask",
                "Python",
                "4ML Algorithms",
                "HTML5",
                "CSS3",
                "Java Script",
            ])
            .demo("https://breast-cancer-predection.netlify.app")
            .code("https://github.com/Mostafa-Zhran/ML-Project-Deployment.git"),
        );
        catalog.insert(
            ProjectId(4),
            ProjectRecord::new(
                "Personal Portfolio V1.0",
                "A clean and modern portfolio showcasing my projects, skills, and \
                 achievements. Designed with simplicity and usability in mind, it highlights \
                 my work in a professional way while offering an easy and engaging experience \
                 for visitors",
                "Images/projects/V1.0.png",
            )
            .tech(["HTML5", "CSS3", "Java Script", "Bootstrap"])
            .demo("https://mostafazahran.netlify.app/")
            .code("https://github.com/Mostafa-Zhran/My_Protofolio"),
        );
        catalog
    }

    /// Parse a JSON array of entries.
    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(s).map_err(CatalogError::Json)?;
        let mut catalog = Self::new();
        for CatalogEntry { id, record } in entries {
            if record.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle(id));
            }
            if catalog.insert(id, record).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }
        Ok(catalog)
    }

    /// Load a JSON catalog from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CatalogError::Io)?;
        Self::from_json_str(&content)
    }

    /// Insert or replace a record, returning the previous one.
    pub fn insert(&mut self, id: ProjectId, record: ProjectRecord) -> Option<ProjectRecord> {
        self.entries.insert(id, record)
    }

    #[must_use]
    pub fn get(&self, id: ProjectId) -> Option<&ProjectRecord> {
        self.entries.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ProjectId) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ProjectId, &ProjectRecord)> {
        self.entries.iter().map(|(id, r)| (*id, r))
    }
}
