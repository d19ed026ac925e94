//! Registry host classification.

const MANAGED_MARKER: &str = "amazonaws";
const REGION_START: &str = "ecr.";
const REGION_END: &str = ".amazonaws";

/// True when the host belongs to Amazon ECR and needs the AWS CLI login flow.
pub fn is_managed_registry(host: &str) -> bool {
    host.contains(MANAGED_MARKER)
}

/// Region between `ecr.` and `.amazonaws` in an ECR host name.
///
/// `123456789.dkr.ecr.us-east-1.amazonaws.com` yields `us-east-1`. Returns
/// `None` when either marker is missing, they are out of order, or the
/// region would be empty.
pub fn extract_region(host: &str) -> Option<&str> {
    let start = host.find(REGION_START)? + REGION_START.len();
    let end = host.find(REGION_END)?;
    let region = host.get(start..end)?;
    (!region.is_empty()).then_some(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecr_host_is_managed() {
        assert!(is_managed_registry(
            "123456789.dkr.ecr.us-east-1.amazonaws.com"
        ));
    }

    #[test]
    fn docker_hub_is_not_managed() {
        assert!(!is_managed_registry("docker.io"));
        assert!(!is_managed_registry("ghcr.io"));
        assert!(!is_managed_registry(""));
    }

    #[test]
    fn extracts_region() {
        assert_eq!(
            extract_region("123.dkr.ecr.us-east-1.amazonaws.com"),
            Some("us-east-1")
        );
        assert_eq!(
            extract_region("987654321098.dkr.ecr.ap-northeast-1.amazonaws.com"),
            Some("ap-northeast-1")
        );
    }

    #[test]
    fn missing_markers_yield_none() {
        assert_eq!(extract_region("public.amazonaws.com"), None);
        assert_eq!(extract_region("123.dkr.ecr.us-east-1.example.com"), None);
        assert_eq!(extract_region("docker.io"), None);
    }

    #[test]
    fn out_of_order_markers_yield_none() {
        assert_eq!(extract_region("x.amazonaws.ecr.com"), None);
    }

    #[test]
    fn empty_region_yields_none() {
        assert_eq!(extract_region("ecr.amazonaws.com"), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn extract_region_never_panics(s in "\\PC*") {
                let _ = extract_region(&s);
            }

            #[test]
            fn managed_iff_contains_marker(s in "[a-z0-9.-]{0,40}") {
                prop_assert_eq!(is_managed_registry(&s), s.contains("amazonaws"));
            }

            #[test]
            fn ecr_host_roundtrip(
                account in "[0-9]{12}",
                region in "[a-z]{2}-[a-z]{4,9}-[1-9]",
            ) {
                let host = format!("{account}.dkr.ecr.{region}.amazonaws.com");
                prop_assert!(is_managed_registry(&host));
                prop_assert_eq!(extract_region(&host), Some(region.as_str()));
            }
        }
    }
}
