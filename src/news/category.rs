#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudVendor {
    Aws,
    Azure,
    Gcp,
    Ibm,
    Oracle,
    Digitalocean,
}

impl CloudVendor {
    pub const ALL: [CloudVendor; 6] = [
        Self::Aws,
        Self::Azure,
        Self::Gcp,
        Self::Ibm,
        Self::Oracle,
        Self::Digitalocean,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Gcp => "gcp",
            Self::Ibm => "ibm",
            Self::Oracle => "oracle",
            Self::Digitalocean => "digitalocean",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.slug() == s)
    }

    /// Label stamped on every article from this vendor's feed.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Azure => "AZURE",
            Self::Gcp => "GCP",
            Self::Ibm => "IBM",
            Self::Oracle => "ORACLE",
            Self::Digitalocean => "DIGITALOCEAN",
        }
    }

    /// Search keyword used when the vendor feed has nothing.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Aws => "AWS cloud",
            Self::Azure => "Microsoft Azure",
            Self::Gcp => "Google Cloud",
            Self::Ibm => "IBM cloud",
            Self::Oracle => "Oracle cloud",
            Self::Digitalocean => "DigitalOcean",
        }
    }

    pub fn feed_url(&self) -> &'static str {
        match self {
            Self::Aws => "https://aws.amazon.com/blogs/aws/feed/",
            Self::Azure => "https://azure.microsoft.com/en-us/blog/feed/",
            Self::Gcp => "https://cloudblog.withgoogle.com/rss/",
            Self::Ibm => "https://www.ibm.com/blogs/cloud-computing/feed/",
            Self::Oracle => "https://blogs.oracle.com/cloud-infrastructure/rss",
            Self::Digitalocean => "https://www.digitalocean.com/blog/rss.xml",
        }
    }
}

/// A browsable category and the providers behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ai,
    DataSecurity,
    CyberSecurity,
    Blockchain,
    CloudComputing,
    Magazines,
    Headlines,
    Cloud(CloudVendor),
}

impl Category {
    pub const KEYWORD_CATEGORIES: [Category; 6] = [
        Self::Ai,
        Self::DataSecurity,
        Self::CyberSecurity,
        Self::Blockchain,
        Self::CloudComputing,
        Self::Magazines,
    ];

    /// Keyword used when none of the table entries match.
    pub const FALLBACK_KEYWORD: &'static str = "technology";

    pub fn from_slug(s: &str) -> Option<Self> {
        match s.trim() {
            "ai" => Some(Self::Ai),
            "data-security" => Some(Self::DataSecurity),
            "cyber-security" => Some(Self::CyberSecurity),
            "blockchain" => Some(Self::Blockchain),
            "cloud-computing" => Some(Self::CloudComputing),
            "magazines" => Some(Self::Magazines),
            "headlines" => Some(Self::Headlines),
            other => other
                .strip_prefix("cloud-")
                .and_then(CloudVendor::from_slug)
                .map(Self::Cloud),
        }
    }

    pub fn slug(&self) -> String {
        match self {
            Self::Ai => "ai".into(),
            Self::DataSecurity => "data-security".into(),
            Self::CyberSecurity => "cyber-security".into(),
            Self::Blockchain => "blockchain".into(),
            Self::CloudComputing => "cloud-computing".into(),
            Self::Magazines => "magazines".into(),
            Self::Headlines => "headlines".into(),
            Self::Cloud(vendor) => format!("cloud-{}", vendor.slug()),
        }
    }

    /// Search keyword for this category.
    pub fn keyword(&self) -> String {
        match self {
            Self::Ai => "artificial intelligence".into(),
            Self::DataSecurity => "data science".into(),
            Self::CyberSecurity => "cybersecurity".into(),
            Self::Blockchain => "blockchain".into(),
            Self::CloudComputing => "cloud computing".into(),
            Self::Magazines => "technology magazine".into(),
            Self::Headlines => Self::FALLBACK_KEYWORD.into(),
            Self::Cloud(vendor) => vendor.keyword().into(),
        }
    }

    /// Vendor feeds behind a cloud category; empty for everything else.
    pub fn vendors(&self) -> Vec<CloudVendor> {
        match self {
            Self::CloudComputing => CloudVendor::ALL.to_vec(),
            Self::Cloud(vendor) => vec![*vendor],
            _ => Vec::new(),
        }
    }

    pub fn is_cloud(&self) -> bool {
        !self.vendors().is_empty()
    }
}
