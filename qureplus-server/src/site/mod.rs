//! Server-rendered pages: the product home page and the printable report.

pub mod content;

use qureplus_common::models::StageTone;
use qureplus_core::intake::{IntakeView, ResultView};
use qureplus_core::{Error, IntakeStep};

use content::*;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; }
header, section, footer { padding: 2rem 8%; }
nav a { margin-right: 1.25rem; color: #6b21a8; text-decoration: none; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1rem; }
.card { border: 1px solid #e5e7eb; border-radius: 0.75rem; padding: 1rem; }
.badge { display: inline-block; padding: 0.2rem 0.6rem; border-radius: 999px; font-weight: 600; }
.green { background: #dcfce7; color: #166534; }
.yellow { background: #fef9c3; color: #854d0e; }
.orange { background: #ffedd5; color: #9a3412; }
.red { background: #fee2e2; color: #991b1b; }
.gray { background: #f3f4f6; color: #374151; }
.disclaimer { background: #fefce8; border: 1px solid #fde047; padding: 1rem; border-radius: 0.5rem; }
@media print { .no-print { display: none; } }
"#;

/// Minimal HTML escaping for text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn tone_class(tone: StageTone) -> &'static str {
    match tone {
        StageTone::Green => "green",
        StageTone::Yellow => "yellow",
        StageTone::Orange => "orange",
        StageTone::Red => "red",
        StageTone::Gray => "gray",
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

fn cards(items: &[Highlight]) -> String {
    items
        .iter()
        .map(|h| {
            format!(
                "<div class=\"card\"><h3>{}</h3><p>{}</p></div>",
                h.title, h.description
            )
        })
        .collect()
}

pub fn render_home() -> String {
    let mut body = String::new();

    let nav: String = NAV
        .iter()
        .map(|(label, href)| format!("<a href=\"{href}\">{label}</a>"))
        .collect();
    body.push_str(&format!(
        "<header id=\"home\"><nav>{nav}</nav><h1>{HERO_TITLE}</h1><p>{HERO_TEXT}</p>\
         <p class=\"no-print\">Start an analysis with <code>POST /api/intake</code>.</p></header>"
    ));

    let stages: String = STAGES
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "<div class=\"card\"><h3>Stage {} – {}</h3><p>{}</p><p><strong>{}</strong></p></div>",
                i + 1,
                s.title,
                s.description,
                s.severity
            )
        })
        .collect();
    body.push_str(&format!(
        "<section id=\"about\"><h2>About QurePlus</h2><div class=\"grid\">{}</div>\
         <h2>Varicose Vein Stages</h2><div class=\"grid\">{}</div></section>",
        cards(&FEATURES),
        stages
    ));

    let treatments: String = TREATMENTS
        .iter()
        .map(|t| {
            let benefits: String = t.benefits.iter().map(|b| format!("<li>{b}</li>")).collect();
            format!(
                "<div class=\"card\"><h3>{}</h3><p>{}</p>\
                 <p>Severity: {}<br>Duration: {}<br>Recovery: {}</p>\
                 <p>Key Benefits:</p><ul>{}</ul></div>",
                t.title, t.description, t.severity, t.duration, t.recovery, benefits
            )
        })
        .collect();
    body.push_str(&format!(
        "<section id=\"treatments\"><h2>Treatment Options</h2><div class=\"grid\">{}</div>\
         <h2>Prevention Tips</h2><div class=\"grid\">{}</div></section>",
        treatments,
        cards(&PREVENTION_TIPS)
    ));

    let steps: String = STEPS
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "<div class=\"card\"><h3>{}. {}</h3><p>{}</p></div>",
                i + 1,
                s.title,
                s.description
            )
        })
        .collect();
    body.push_str(&format!(
        "<section id=\"how-it-works\"><h2>How It Works</h2><div class=\"grid\">{steps}</div></section>"
    ));

    body.push_str(&format!(
        "<footer id=\"contact\"><h2>Contact</h2><p>{CONTACT_PHONE}<br>{CONTACT_EMAIL}<br>{}<br>{}</p>\
         <p>&copy; QurePlus</p></footer>",
        CONTACT_ADDRESS[0], CONTACT_ADDRESS[1]
    ));

    page("QurePlus - AI Varicose Vein Analysis", &body)
}

/// Printable report of a finished intake.
pub fn render_report(view: &IntakeView) -> Result<String, Error> {
    let (IntakeStep::Results, Some(ResultView { result, tone })) = (view.step, view.result.as_ref())
    else {
        return Err(Error::InvalidState(format!(
            "no finished analysis to report (step={:?})",
            view.step
        )));
    };

    let mut body = String::from("<section><h1>QurePlus Analysis Report</h1>");
    if let Some(user) = view.user.as_ref() {
        body.push_str(&format!(
            "<p><strong>{}</strong>, {} years, {}<br>{}{}</p>",
            escape_html(&user.full_name),
            user.age,
            escape_html(&user.city),
            escape_html(&user.mobile),
            user.email
                .as_deref()
                .map(|e| format!(" · {}", escape_html(e)))
                .unwrap_or_default()
        ));
    }
    body.push_str(&format!(
        "<div class=\"card\"><p>Varicose vein probability: <strong>{:.0}%</strong></p>\
         <p><span class=\"badge {}\">{}</span></p><p>{}</p>\
         <p><small>Analyzed {}</small></p></div>",
        result.probability,
        tone_class(*tone),
        escape_html(&result.stage),
        escape_html(&result.reasoning),
        result.timestamp.format("%Y-%m-%d %H:%M UTC")
    ));
    body.push_str(&format!(
        "<p class=\"disclaimer\"><strong>Medical Disclaimer</strong><br>{MEDICAL_DISCLAIMER}</p>\
         <p class=\"no-print\"><button onclick=\"window.print()\">Print Report</button></p></section>"
    ));

    Ok(page("QurePlus Analysis Report", &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn home_page_has_every_section() {
        let html = render_home();
        for anchor in ["home", "about", "treatments", "how-it-works", "contact"] {
            assert!(html.contains(&format!("id=\"{anchor}\"")), "missing {anchor}");
        }
        assert!(html.contains("Radiofrequency Ablation"));
        assert!(html.contains("Stage 5 – Ulcers"));
        assert!(html.contains("Leg Elevation"));
    }
}
