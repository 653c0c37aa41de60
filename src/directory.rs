//! Organization name → domain directory.
//!
//! Seeded from a static table of well-known organizations and extendable at
//! runtime. Shared between concurrent requests: lookups take the read lock,
//! `add_company_domain` takes the write lock. Keys are always stored in
//! normalized form (see [`normalize_company_name`]).

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::domain_utils::normalize_company_name;

/// Well-known organizations, keyed by normalized name.
pub const WELL_KNOWN_COMPANIES: &[(&str, &str)] = &[
    // Technology
    ("google", "google.com"),
    ("alphabet", "google.com"),
    ("microsoft", "microsoft.com"),
    ("apple", "apple.com"),
    ("amazon", "amazon.com"),
    ("meta", "meta.com"),
    ("facebook", "meta.com"),
    ("twitter", "twitter.com"),
    ("x", "x.com"),
    ("linkedin", "linkedin.com"),
    ("netflix", "netflix.com"),
    ("uber", "uber.com"),
    ("airbnb", "airbnb.com"),
    ("spotify", "spotify.com"),
    ("salesforce", "salesforce.com"),
    ("oracle", "oracle.com"),
    ("ibm", "ibm.com"),
    ("intel", "intel.com"),
    ("nvidia", "nvidia.com"),
    ("adobe", "adobe.com"),
    ("paypal", "paypal.com"),
    ("stripe", "stripe.com"),
    ("shopify", "shopify.com"),
    ("zoom", "zoom.us"),
    ("slack", "slack.com"),
    ("dropbox", "dropbox.com"),
    ("tesla", "tesla.com"),
    ("spacex", "spacex.com"),
    // India
    ("zepto", "zeptonow.com"),
    ("swiggy", "swiggy.com"),
    ("zomato", "zomato.com"),
    ("flipkart", "flipkart.com"),
    ("myntra", "myntra.com"),
    ("razorpay", "razorpay.com"),
    ("paytm", "paytm.com"),
    ("phonepe", "phonepe.com"),
    ("cred", "cred.club"),
    ("byjus", "byjus.com"),
    ("infosys", "infosys.com"),
    ("tcs", "tcs.com"),
    ("tata", "tata.com"),
    ("reliance", "reliance.co.in"),
    ("wipro", "wipro.com"),
    ("hcl", "hcl.com"),
    // Financial services
    ("goldman sachs", "gs.com"),
    ("morgan stanley", "morganstanley.com"),
    ("jpmorgan", "jpmorgan.com"),
    ("jpmorgan chase", "jpmorgan.com"),
    ("bank of america", "bankofamerica.com"),
    ("wells fargo", "wellsfargo.com"),
    ("citibank", "citi.com"),
    ("visa", "visa.com"),
    ("mastercard", "mastercard.com"),
    // Consulting
    ("mckinsey", "mckinsey.com"),
    ("bain", "bain.com"),
    ("boston consulting", "bcg.com"),
    ("bcg", "bcg.com"),
    ("deloitte", "deloitte.com"),
    ("pwc", "pwc.com"),
    ("pricewaterhousecoopers", "pwc.com"),
    ("ey", "ey.com"),
    ("ernst young", "ey.com"),
    ("kpmg", "kpmg.com"),
    ("accenture", "accenture.com"),
    // Media, apparel
    ("disney", "disney.com"),
    ("warner bros", "warnerbros.com"),
    ("sony", "sony.com"),
    ("nike", "nike.com"),
    ("adidas", "adidas.com"),
    // Retail
    ("walmart", "walmart.com"),
    ("target", "target.com"),
    ("costco", "costco.com"),
    ("ebay", "ebay.com"),
    ("etsy", "etsy.com"),
    // Automotive
    ("ford", "ford.com"),
    ("general motors", "gm.com"),
    ("gm", "gm.com"),
    ("bmw", "bmw.com"),
    ("mercedes", "mercedes-benz.com"),
    ("volkswagen", "volkswagen.com"),
    ("toyota", "toyota.com"),
    ("honda", "honda.com"),
    // Food & beverage
    ("starbucks", "starbucks.com"),
    ("mcdonalds", "mcdonalds.com"),
    ("coca cola", "coca-cola.com"),
    ("pepsi", "pepsico.com"),
    // Healthcare
    ("pfizer", "pfizer.com"),
    ("johnson johnson", "jnj.com"),
    ("jnj", "jnj.com"),
    ("novartis", "novartis.com"),
    ("roche", "roche.com"),
    // Telecom
    ("verizon", "verizon.com"),
    ("at&t", "att.com"),
    ("att", "att.com"),
    ("t-mobile", "t-mobile.com"),
    ("sprint", "sprint.com"),
    // Energy
    ("exxonmobil", "exxonmobil.com"),
    ("chevron", "chevron.com"),
    ("shell", "shell.com"),
    ("bp", "bp.com"),
];

/// Lock-guarded company directory.
#[derive(Debug, Default)]
pub struct CompanyDirectory {
    map: RwLock<HashMap<String, String>>,
}

impl CompanyDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory seeded with [`WELL_KNOWN_COMPANIES`].
    pub fn with_well_known() -> Self {
        let map = WELL_KNOWN_COMPANIES
            .iter()
            .map(|(name, domain)| (name.to_string(), domain.to_string()))
            .collect();
        Self {
            map: RwLock::new(map),
        }
    }

    /// Add or replace a mapping. The key is normalized like lookups are.
    pub fn add_company_domain(&self, company: &str, domain: &str) {
        let key = normalize_company_name(company);
        let domain = domain.trim().to_lowercase();
        debug!(company = %key, domain = %domain, "added company domain mapping");
        self.map.write().insert(key, domain);
    }

    /// Look up a company by (unnormalized) name.
    pub fn lookup(&self, company: &str) -> Option<String> {
        let key = normalize_company_name(company);
        self.map.read().get(&key).cloned()
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}
