//! Data Model: ArchitectureRecord and its enumerated fields
//!
//! Every enumerated field has a `None` member that absorbs unknown or
//! unspecified wire values, so a record is never partially undefined.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Declares a closed wire enum with a lenient parser.
///
/// The first alias listed for a variant is its canonical wire name.
/// Anything that matches no alias parses as `None`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => [$($alias:literal),+] ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            /// Absent, unknown or unspecified
            #[default]
            None,
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Canonical wire name
            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::None => "none",
                    $( $name::$variant => wire_enum!(@first $($alias),+) ),+
                }
            }

            /// Parse a wire value, mapping anything unrecognised to `None`
            pub fn parse(raw: &str) -> Self {
                let key = raw.trim().to_ascii_lowercase();
                match key.as_str() {
                    $( $($alias)|+ => $name::$variant, )+
                    _ => $name::None,
                }
            }

            /// Whether a real component was named
            pub fn is_present(&self) -> bool {
                !matches!(self, $name::None)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = Option::<String>::deserialize(deserializer)?;
                Ok(raw.as_deref().map($name::parse).unwrap_or_default())
            }
        }
    };
    (@first $first:literal $(, $rest:literal)*) => { $first };
}

wire_enum! {
    /// How compute capacity is provisioned
    pub enum ComputeModel {
        /// Plain virtual machines
        VirtualMachine => ["ec2", "vm", "virtual_machine"],
        /// Managed container service
        ManagedContainer => ["ecs", "managed_container"],
        /// Orchestrated container cluster
        OrchestratedCluster => ["eks", "kubernetes", "k8s", "gke", "aks"],
        /// Serverless functions
        ServerlessFunction => ["lambda", "serverless", "functions"],
        /// Serverless containers
        ServerlessContainer => ["fargate", "cloud_run", "serverless_container"],
    }
}

wire_enum! {
    /// Compute scaling strategy
    pub enum ScalingMode {
        Automatic => ["auto_scaling", "auto", "autoscaling", "automatic"],
        Manual => ["manual"],
    }
}

wire_enum! {
    /// Primary data store
    pub enum DatabaseKind {
        RelationalManaged => ["rds", "postgres", "mysql", "relational"],
        RelationalDistributed => ["aurora", "spanner", "cockroachdb"],
        KeyValueManaged => ["dynamodb", "cosmosdb", "key_value"],
        CacheOnly => ["redis_only", "cache_only"],
    }
}

wire_enum! {
    /// Caching tier in front of the data store
    pub enum CachingLayer {
        Managed => ["elasticache", "managed"],
        SelfHosted => ["redis", "memcached", "self_hosted"],
    }
}

wire_enum! {
    /// Load balancer in front of compute
    pub enum LoadBalancerKind {
        ApplicationLayer => ["alb", "application"],
        NetworkLayer => ["nlb", "network", "elb"],
    }
}

wire_enum! {
    /// Content delivery network
    pub enum CdnKind {
        CloudFront => ["cloudfront"],
        Cloudflare => ["cloudflare", "fastly", "akamai"],
    }
}

wire_enum! {
    /// Monitoring provider
    pub enum MonitoringKind {
        CloudWatch => ["cloudwatch"],
        Datadog => ["datadog", "newrelic", "new_relic"],
        Prometheus => ["prometheus", "grafana"],
    }
}

wire_enum! {
    /// Container orchestration platform
    pub enum OrchestrationKind {
        Kubernetes => ["kubernetes", "k8s", "eks"],
        ManagedContainerService => ["ecs"],
    }
}

/// Structured description of one cloud deployment
///
/// Field names follow the decomposition wire contract.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectureRecord {
    // === Compute ===
    pub compute_model: ComputeModel,
    pub compute_count: u32,
    pub scaling_type: ScalingMode,

    // === Data ===
    pub database_type: DatabaseKind,
    pub database_multi_az: bool,
    pub database_replicas: u32,
    pub caching_layer: CachingLayer,

    // === Network / edge ===
    pub load_balancer: LoadBalancerKind,
    pub cdn: CdnKind,
    pub api_gateway: bool,

    // === Security ===
    /// VPC-equivalent network isolation
    pub vpc: bool,
    pub private_subnets: bool,
    pub waf: bool,
    /// Encryption at rest and in transit
    pub encryption: bool,
    pub ssl_tls: bool,
    /// Identity and access policies
    pub iam_configured: bool,
    /// Network-level access rules
    pub security_groups: bool,

    // === Operations ===
    pub monitoring: MonitoringKind,
    pub ci_cd: bool,
    pub container_orchestration: OrchestrationKind,

    // === Economics ===
    pub reserved_instances: bool,
    pub spot_instances: bool,
    pub serverless_components: u32,

    // === Scale context ===
    pub multi_region: bool,
    pub backup_strategy: bool,
    pub microservices: bool,
    /// Estimated concurrent users, 0 when unknown
    pub estimated_users: u64,
}

impl ArchitectureRecord {
    /// True when compute scales automatically
    pub fn auto_scales(&self) -> bool {
        self.scaling_type == ScalingMode::Automatic
    }

    /// True when compute is, or includes, serverless capacity
    pub fn uses_serverless(&self) -> bool {
        self.serverless_components > 0 || self.compute_model == ComputeModel::ServerlessFunction
    }
}
