//! Registrar referral extraction.

use super::parse::extract_field;
use super::patterns::REFERRAL_PATTERNS;

/// Finds the registrar ("thick") WHOIS server announced in a response.
///
/// Labels are tried in the order of [`super::patterns::REFERRAL_LABELS`]; the
/// first one present anywhere in the text wins. `None` means the response is
/// already authoritative, which is not an error.
pub fn extract_referral(text: &str) -> Option<String> {
    extract_field(text, &REFERRAL_PATTERNS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrar_whois_server() {
        let text = "Domain Name: EXAMPLE.COM\r\nRegistrar WHOIS Server: whois.markmonitor.com\r\n";
        assert_eq!(
            extract_referral(text).as_deref(),
            Some("whois.markmonitor.com")
        );
    }

    #[test]
    fn test_registrar_label_beats_bare_label_regardless_of_line_order() {
        let text = "WHOIS Server: whois.x.example\nRegistrar WHOIS Server: whois.y.example\n";
        assert_eq!(extract_referral(text).as_deref(), Some("whois.y.example"));
    }

    #[test]
    fn test_registrar_whois_short_label() {
        let text = "Registrar Whois: whois.short.example\nWhois Server: whois.other.example\n";
        assert_eq!(
            extract_referral(text).as_deref(),
            Some("whois.short.example")
        );
    }

    #[test]
    fn test_bare_whois_server_label() {
        let text = "whois server:   whois.lower.example  \n";
        assert_eq!(
            extract_referral(text).as_deref(),
            Some("whois.lower.example")
        );
    }

    #[test]
    fn test_no_referral() {
        let text = "Domain name: example.de\nStatus: connect\n";
        assert_eq!(extract_referral(text), None);
    }

    #[test]
    fn test_empty_referral_value_is_ignored() {
        let text = "Registrar WHOIS Server: \r\nDomain Status: ok\r\n";
        assert_eq!(extract_referral(text), None);
    }
}
