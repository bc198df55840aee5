use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn css_class(self) -> &'static str {
        match self {
            BannerKind::Success => "alert alert-success alert-dismissible fade show",
            BannerKind::Error => "alert alert-danger alert-dismissible fade show",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub message: String,
}

/// Alerts shown above the form, newest first. Each banner is removed by id,
/// so expiring one never touches the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BannerStack {
    next_id: u64,
    banners: VecDeque<Banner>,
}

impl BannerStack {
    pub fn push(&mut self, kind: BannerKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.banners.push_front(Banner {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Remove banner `id`. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        match self.banners.iter().position(|b| b.id == id) {
            Some(idx) => {
                self.banners.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Banner> {
        self.banners.iter()
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_banner_first() {
        let mut stack = BannerStack::default();
        stack.push(BannerKind::Success, "first");
        stack.push(BannerKind::Error, "second");
        let messages: Vec<&str> = stack.iter().map(|b| b.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn test_banners_expire_independently() {
        let mut stack = BannerStack::default();
        let a = stack.push(BannerKind::Error, "a");
        let b = stack.push(BannerKind::Error, "b");
        let c = stack.push(BannerKind::Success, "c");

        assert!(stack.dismiss(a));
        assert_eq!(stack.len(), 2);
        assert!(stack.iter().any(|x| x.id == b));
        assert!(stack.iter().any(|x| x.id == c));

        assert!(stack.dismiss(c));
        assert!(stack.dismiss(b));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_dismiss_after_manual_close_is_noop() {
        let mut stack = BannerStack::default();
        let id = stack.push(BannerKind::Success, "done");
        assert!(stack.dismiss(id));
        assert!(!stack.dismiss(id));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut stack = BannerStack::default();
        let a = stack.push(BannerKind::Success, "a");
        stack.dismiss(a);
        let b = stack.push(BannerKind::Success, "b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_css_class_per_kind() {
        assert!(BannerKind::Success.css_class().contains("alert-success"));
        assert!(BannerKind::Error.css_class().contains("alert-danger"));
    }
}
