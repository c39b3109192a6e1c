//! Use-case catalog, overview metrics and the reference architecture shown
//! to operators.
//!
//! This is static reference data; nothing here is mutated at runtime.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::RagError;

/// Business area a use case belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Domain {
    Network,
    #[serde(rename = "IT")]
    It,
    Customer,
    Security,
}

/// Lifecycle stage of a use case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Status {
    Production,
    Development,
    Concept,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Network => f.pad("Network"),
            Domain::It => f.pad("IT"),
            Domain::Customer => f.pad("Customer"),
            Domain::Security => f.pad("Security"),
        }
    }
}

impl FromStr for Domain {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "network" => Ok(Domain::Network),
            "it" => Ok(Domain::It),
            "customer" => Ok(Domain::Customer),
            "security" => Ok(Domain::Security),
            other => Err(RagError::ConfigError(format!("unknown domain '{other}'"))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Production => f.pad("Production"),
            Status::Development => f.pad("Development"),
            Status::Concept => f.pad("Concept"),
        }
    }
}

impl FromStr for Status {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" => Ok(Status::Production),
            "development" => Ok(Status::Development),
            "concept" => Ok(Status::Concept),
            other => Err(RagError::ConfigError(format!("unknown status '{other}'"))),
        }
    }
}

/// An AI use case tracked by the platform team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UseCase {
    pub id: String,
    pub title: String,
    pub description: String,
    pub domain: Domain,
    pub status: Status,
    pub owner: String,
    pub last_updated: NaiveDate,
}

/// Direction of a metric's recent change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// Displayed value of a metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{n}"),
            MetricValue::Text(t) => write!(f, "{t}"),
        }
    }
}

/// A headline platform metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemMetric {
    pub name: String,
    pub value: MetricValue,
    /// Percentage change over the reporting window, when the metric has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    /// Sub-label shown under the value, e.g. `+24 active now`.
    pub detail: String,
    pub trend: Trend,
}

/// Query volume and mean latency for one reporting slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ActivitySample {
    pub time: NaiveTime,
    pub queries: u32,
    pub latency_ms: u32,
}

/// Number of indexed documents for one knowledge area.
///
/// Areas are wider than [`Domain`]; the knowledge base also covers legal and
/// HR material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageEntry {
    pub area: String,
    pub docs: u32,
}

/// One stage of the retrieval-augmented pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineStage {
    pub title: String,
    pub description: String,
}

/// Logical data flow of the deployment plus its operational guarantees.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Architecture {
    pub title: String,
    pub summary: String,
    /// Stages in data-flow order.
    pub stages: Vec<PipelineStage>,
    pub implementation_details: Vec<String>,
}

impl Architecture {
    /// The on-premise TelcoNexus deployment.
    pub fn telco_default() -> Self {
        let stage = |title: &str, description: &str| PipelineStage {
            title: title.into(),
            description: description.into(),
        };
        Self {
            title: "Secure RAG Architecture".into(),
            summary: "Logical data flow for the on-premise implementation ensuring data \
                      sovereignty and minimal latency."
                .into(),
            stages: vec![
                stage("Ingestion Sources", "Confluence, Jira, Git, SQL Schemas (Internal Network)"),
                stage("Vector Store", "Embeddings stored in pgvector/Milvus (Private VPC)"),
                stage("Retrieval Engine", "Semantic Search + Re-ranking (Python/LangChain)"),
                stage("Generative Model", "Gemini 2.5 Flash (Vertex AI / Secure Endpoint)"),
            ],
            implementation_details: vec![
                "All data encryption at rest (AES-256) and in transit (TLS 1.3).".into(),
                "Role-Based Access Control (RBAC) integrated with corporate LDAP.".into(),
                "Automatic daily re-indexing of \"Production\" status runbooks.".into(),
                "Feedback loop implementation: User ratings tune retrieval weights.".into(),
            ],
        }
    }
}

/// Filter criteria for [`Catalog::use_cases`]. `None` matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct UseCaseFilter {
    pub domain: Option<Domain>,
    pub status: Option<Status>,
}

/// Static catalog of use cases, overview metrics and architecture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    use_cases: Vec<UseCase>,
    metrics: Vec<SystemMetric>,
    #[serde(default)]
    activity: Vec<ActivitySample>,
    #[serde(default)]
    coverage: Vec<CoverageEntry>,
    #[serde(default)]
    architecture: Architecture,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap_or_default()
}

impl Catalog {
    pub fn new(use_cases: Vec<UseCase>, metrics: Vec<SystemMetric>) -> Self {
        Self {
            use_cases,
            metrics,
            activity: Vec::new(),
            coverage: Vec::new(),
            architecture: Architecture::default(),
        }
    }

    /// Replace the query volume/latency series.
    pub fn with_activity(mut self, activity: Vec<ActivitySample>) -> Self {
        self.activity = activity;
        self
    }

    /// Replace the per-area document counts.
    pub fn with_coverage(mut self, coverage: Vec<CoverageEntry>) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = architecture;
        self
    }

    /// The TelcoNexus catalog.
    pub fn telco_default() -> Self {
        let use_case = |id: &str,
                        title: &str,
                        description: &str,
                        domain: Domain,
                        status: Status,
                        owner: &str,
                        last_updated: NaiveDate| UseCase {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            domain,
            status,
            owner: owner.into(),
            last_updated,
        };
        let metric = |name: &str,
                      value: MetricValue,
                      change: Option<f64>,
                      detail: &str,
                      trend: Trend| SystemMetric {
            name: name.into(),
            value,
            change,
            detail: detail.into(),
            trend,
        };
        let sample = |h: u32, queries: u32, latency_ms: u32| ActivitySample {
            time: hour(h),
            queries,
            latency_ms,
        };
        let coverage = |area: &str, docs: u32| CoverageEntry { area: area.into(), docs };

        let use_cases = vec![
            use_case(
                "UC-001",
                "Automated HSS Node Recovery",
                "Diagnoses and restarts hung HSS nodes based on alarm code 5003.",
                Domain::Network,
                Status::Production,
                "NetOps Team A",
                date(2023, 10, 15),
            ),
            use_case(
                "UC-002",
                "5G Slice SLA Monitoring",
                "Real-time analysis of latency KPIs for URLLC slices.",
                Domain::Network,
                Status::Development,
                "Radio Planning",
                date(2023, 11, 2),
            ),
            use_case(
                "UC-003",
                "Fiber Cut Triangulation",
                "Correlates OTDR logs with GIS data to pinpoint fiber breaks.",
                Domain::Network,
                Status::Concept,
                "Field Ops",
                date(2023, 12, 1),
            ),
            use_case(
                "UC-004",
                "Customer Churn Prediction",
                "Analyzes CDRs and support tickets to predict churn risk.",
                Domain::Customer,
                Status::Production,
                "Data Science",
                date(2023, 9, 20),
            ),
        ];
        let metrics = vec![
            metric(
                "Total Ingested Docs",
                MetricValue::Number(12450.0),
                Some(12.0),
                "+12% this week",
                Trend::Up,
            ),
            metric(
                "Avg. Query Latency",
                MetricValue::Text("450ms".into()),
                Some(-8.0),
                "-8% improvement",
                Trend::Down,
            ),
            metric("Active Sessions", MetricValue::Number(84.0), None, "+24 active now", Trend::Up),
            metric(
                "System Health",
                MetricValue::Text("99.9%".into()),
                None,
                "All systems operational",
                Trend::Neutral,
            ),
        ];

        Self::new(use_cases, metrics)
            .with_activity(vec![
                sample(8, 40, 240),
                sample(10, 300, 139),
                sample(12, 200, 980),
                sample(14, 278, 390),
                sample(16, 189, 480),
                sample(18, 239, 380),
                sample(20, 349, 430),
            ])
            .with_coverage(vec![
                coverage("Network", 120),
                coverage("IT", 80),
                coverage("Security", 45),
                coverage("Legal", 20),
                coverage("HR", 15),
            ])
            .with_architecture(Architecture::telco_default())
    }

    /// Use cases matching `filter`, in catalog order.
    pub fn use_cases(&self, filter: UseCaseFilter) -> Vec<&UseCase> {
        self.use_cases
            .iter()
            .filter(|u| filter.domain.is_none_or(|d| u.domain == d))
            .filter(|u| filter.status.is_none_or(|s| u.status == s))
            .collect()
    }

    pub fn metrics(&self) -> &[SystemMetric] {
        &self.metrics
    }

    /// Query volume and latency by time of day, oldest first.
    pub fn activity(&self) -> &[ActivitySample] {
        &self.activity
    }

    pub fn coverage(&self) -> &[CoverageEntry] {
        &self.coverage
    }

    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::telco_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_domain_and_status() {
        let catalog = Catalog::telco_default();
        assert_eq!(catalog.use_cases(UseCaseFilter::default()).len(), 4);

        let network =
            catalog.use_cases(UseCaseFilter { domain: Some(Domain::Network), status: None });
        assert_eq!(network.len(), 3);

        let prod_network = catalog.use_cases(UseCaseFilter {
            domain: Some(Domain::Network),
            status: Some(Status::Production),
        });
        assert_eq!(prod_network.len(), 1);
        assert_eq!(prod_network[0].id, "UC-001");
    }

    #[test]
    fn parses_filter_values_case_insensitively() {
        assert_eq!("it".parse::<Domain>().unwrap(), Domain::It);
        assert_eq!("CONCEPT".parse::<Status>().unwrap(), Status::Concept);
        assert!("legal".parse::<Domain>().is_err());
    }

    #[test]
    fn serializes_domain_and_date_like_the_dashboard() {
        let catalog = Catalog::telco_default();
        let value = serde_json::to_value(catalog.use_cases(UseCaseFilter::default())[3]).unwrap();
        assert_eq!(value["domain"], "Customer");
        assert_eq!(value["last_updated"], "2023-09-20");

        let metric = serde_json::to_value(&catalog.metrics()[1]).unwrap();
        assert_eq!(metric["value"], "450ms");
        assert_eq!(metric["trend"], "down");
    }

    #[test]
    fn count_metrics_carry_a_label_instead_of_a_percentage() {
        let catalog = Catalog::telco_default();
        let sessions = &catalog.metrics()[2];
        assert_eq!(sessions.name, "Active Sessions");
        assert_eq!(sessions.change, None);
        assert_eq!(sessions.detail, "+24 active now");

        let health = serde_json::to_value(&catalog.metrics()[3]).unwrap();
        assert_eq!(health["detail"], "All systems operational");
        assert!(health.get("change").is_none());
    }

    #[test]
    fn activity_series_is_ordered_by_time() {
        let catalog = Catalog::telco_default();
        let activity = catalog.activity();
        assert_eq!(activity.len(), 7);
        assert!(activity.windows(2).all(|w| w[0].time < w[1].time));

        let peak = activity.iter().max_by_key(|s| s.latency_ms).unwrap();
        assert_eq!(peak.time, hour(12));
        assert_eq!(peak.latency_ms, 980);
    }

    #[test]
    fn coverage_includes_areas_outside_use_case_domains() {
        let catalog = Catalog::telco_default();
        let areas: Vec<_> = catalog.coverage().iter().map(|c| c.area.as_str()).collect();
        assert_eq!(areas, vec!["Network", "IT", "Security", "Legal", "HR"]);
        assert_eq!(catalog.coverage().iter().map(|c| c.docs).sum::<u32>(), 280);
    }

    #[test]
    fn architecture_lists_stages_in_data_flow_order() {
        let architecture = Catalog::telco_default().architecture().clone();
        let titles: Vec<_> = architecture.stages.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Ingestion Sources", "Vector Store", "Retrieval Engine", "Generative Model"]
        );
        assert_eq!(architecture.implementation_details.len(), 4);
        assert!(architecture.implementation_details[0].contains("AES-256"));
    }

    #[test]
    fn catalog_json_without_series_still_loads() {
        let json = serde_json::json!({"use_cases": [], "metrics": []});
        let catalog: Catalog = serde_json::from_value(json).unwrap();
        assert!(catalog.activity().is_empty());
        assert!(catalog.architecture().stages.is_empty());
    }
}
