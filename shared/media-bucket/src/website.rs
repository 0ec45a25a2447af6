//! Static website endpoint of a bucket

/// Regions whose website endpoint uses the legacy `s3-website-<region>` form
const DASH_STYLE_REGIONS: &[&str] = &[
    "us-east-1",
    "us-west-1",
    "us-west-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "eu-west-1",
    "sa-east-1",
    "us-gov-west-1",
];

/// Returns the S3 static website host for `region`
#[must_use]
pub fn website_endpoint(region: &str) -> String {
    if DASH_STYLE_REGIONS.contains(&region) {
        format!("s3-website-{region}.amazonaws.com")
    } else {
        format!("s3-website.{region}.amazonaws.com")
    }
}

/// Returns the public base URL derivatives are served from
///
/// Website endpoints only speak plain HTTP.
#[must_use]
pub fn site_base_url(bucket: &str, region: &str) -> String {
    format!("http://{bucket}.{}", website_endpoint(region))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_style_region() {
        assert_eq!(
            site_base_url("photos", "us-east-1"),
            "http://photos.s3-website-us-east-1.amazonaws.com"
        );
        assert_eq!(
            website_endpoint("eu-west-1"),
            "s3-website-eu-west-1.amazonaws.com"
        );
    }

    #[test]
    fn test_dot_style_region() {
        assert_eq!(
            site_base_url("photos", "eu-central-1"),
            "http://photos.s3-website.eu-central-1.amazonaws.com"
        );
        assert_eq!(
            website_endpoint("ap-south-1"),
            "s3-website.ap-south-1.amazonaws.com"
        );
    }
}
