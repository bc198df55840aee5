const SDK_URL: &str = "//dapi.kakao.com/v2/maps/sdk.js";

pub const FALLBACK_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Cafe Diary</title></head>
<body>
<h1>Cafe Diary</h1>
<p>Frontend not built yet. Run <code>dx build</code> and restart the server.</p>
</body>
</html>"#;

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<script>` tag loading the map SDK with the geocoding library. The
/// frontend calls `kakao.maps.load` itself, so autoload is off.
pub fn sdk_script_tag(app_key: &str) -> String {
    format!(
        r#"<script type="text/javascript" src="{}?appkey={}&amp;libraries=services&amp;autoload=false"></script>"#,
        SDK_URL,
        escape_attr(app_key)
    )
}

/// Insert the SDK tag right before `</head>`, or at the top of the document
/// if there is no head.
pub fn inject_map_sdk(html: &str, app_key: &str) -> String {
    let tag = sdk_script_tag(app_key);
    match html.find("</head>") {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + tag.len());
            out.push_str(&html[..pos]);
            out.push_str(&tag);
            out.push_str(&html[pos..]);
            out
        }
        None => format!("{}{}", tag, html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_tag_carries_key_and_services() {
        let tag = sdk_script_tag("abc123");
        assert!(tag.contains("appkey=abc123"));
        assert!(tag.contains("libraries=services"));
        assert!(tag.contains("autoload=false"));
    }

    #[test]
    fn test_script_tag_escapes_key() {
        let tag = sdk_script_tag(r#"x"><script>alert(1)</script>"#);
        assert!(!tag.contains("<script>alert"));
        assert!(tag.contains("&quot;&gt;"));
    }

    #[test]
    fn test_inject_before_head_close() {
        let html = "<html><head><title>t</title></head><body></body></html>";
        let out = inject_map_sdk(html, "k");
        let script = out.find("dapi.kakao.com").unwrap();
        let head_close = out.find("</head>").unwrap();
        assert!(script < head_close);
        assert!(out.ends_with("</head><body></body></html>"));
    }

    #[test]
    fn test_inject_without_head() {
        let out = inject_map_sdk("<body></body>", "k");
        assert!(out.starts_with("<script"));
        assert!(out.ends_with("<body></body>"));
    }
}
