use crate::models::launch::LaunchParams;

/// `https://t.me/<app>[/<type>][?startapp=<ref>]`; a ref link that is already
/// a URL is returned as-is. `None` when there is nothing to open.
pub fn build_telegram_link(params: &LaunchParams) -> Option<String> {
    let reference = params.ref_link.trim();
    if reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("tg://")
    {
        return Some(reference.to_string());
    }

    let app = params.app_name.trim().trim_start_matches('@');
    if app.is_empty() {
        return None;
    }

    let mut link = format!("https://t.me/{}", app);
    let app_type = params.app_type.trim();
    if !app_type.is_empty() {
        link.push('/');
        link.push_str(app_type);
    }
    if !reference.is_empty() {
        link.push_str("?startapp=");
        link.push_str(reference);
    }
    Some(link)
}
