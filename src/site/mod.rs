//! # Landing Page
//!
//! Stateless, server-rendered marketing page: seven presentational sections
//! composed in fixed order inside a page shell. No inputs, no state.

pub mod sections;

use sections::{cta, features, footer, hero, how_it_works, navbar, testimonials};

/// Section order is part of the page contract
pub const SECTION_COUNT: usize = 7;

/// Render the full landing page
pub fn render() -> String {
    let body = [
        navbar(),
        hero(),
        features(),
        how_it_works(),
        testimonials(),
        cta(),
        footer(),
    ]
    .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Stackpilot — Ship your side project faster</title>
<style>
  :root {{ --ink: #15202b; --accent: #2d6cdf; --soft: #f4f7fb; }}
  * {{ box-sizing: border-box; margin: 0; }}
  body {{ font-family: system-ui, sans-serif; color: var(--ink); line-height: 1.6; }}
  section, nav, footer {{ padding: 3rem 1.5rem; max-width: 64rem; margin: 0 auto; }}
  nav {{ display: flex; justify-content: space-between; padding: 1rem 1.5rem; }}
  .btn {{ background: var(--accent); color: #fff; padding: .7rem 1.4rem; border-radius: .4rem; text-decoration: none; }}
  .muted {{ color: #5b6b7b; }}
  .grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); gap: 1.5rem; }}
  .card {{ background: var(--soft); border-radius: .6rem; padding: 1.5rem; }}
  blockquote {{ font-style: italic; }}
</style>
</head>
<body>
{body}
</body>
</html>"#
    )
}
