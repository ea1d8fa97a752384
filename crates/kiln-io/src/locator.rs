//! Locator clean-up applied to catalog records before they reach the view
//! or the alignment engine.

/// Rewrite a catalog path into a servable URL under `base_url`.
///
/// A leading `./` or `/` is dropped and every path segment is
/// percent-encoded, so `main-image (1).png` becomes `main-image%20%281%29.png`.
/// Empty input stays empty and `http(s)` URLs pass through untouched.
pub fn normalize_locator(base_url: &str, raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if kiln_align::is_remote(raw) {
        return raw.to_string();
    }
    let clean = raw.strip_prefix("./").or_else(|| raw.strip_prefix('/')).unwrap_or(raw);
    let encoded: Vec<String> = clean
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{}{}", base_url, encoded.join("/"))
}

/// Point `.jpg`/`.jpeg` locators at the `.png` export of the same image.
pub fn fix_image_extension(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    for ext in [".jpeg", ".jpg"] {
        if lower.ends_with(ext) {
            return format!("{}.png", &raw[..raw.len() - ext.len()]);
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_encodes_segments() {
        assert_eq!(
            normalize_locator("/Latent-Kiln/", "./assets/images/original/main-image (1).jpg"),
            "/Latent-Kiln/assets/images/original/main-image%20%281%29.jpg"
        );
        assert_eq!(normalize_locator("/", "/assets/a.png"), "/assets/a.png");
        assert_eq!(normalize_locator("/base/", "plain.png"), "/base/plain.png");
    }

    #[test]
    fn test_normalize_empty_stays_empty() {
        assert_eq!(normalize_locator("/Latent-Kiln/", ""), "");
    }

    #[test]
    fn test_remote_locators_untouched() {
        let url = "https://picsum.photos/seed/latent_kiln_vase_1_neck/150/100";
        assert_eq!(normalize_locator("/Latent-Kiln/", url), url);
    }

    #[test]
    fn test_only_one_leading_slash_removed() {
        assert_eq!(normalize_locator("", "//x.png"), "/x.png");
    }

    #[test]
    fn test_fix_extension() {
        assert_eq!(fix_image_extension("a/b.JPG"), "a/b.png");
        assert_eq!(fix_image_extension("a/b.jpeg"), "a/b.png");
        assert_eq!(fix_image_extension("a/b.png"), "a/b.png");
        assert_eq!(fix_image_extension("a/jpg"), "a/jpg");
    }
}
