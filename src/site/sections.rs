//! Presentational sections of the landing page. Each function returns a
//! self-contained HTML fragment; composition order lives in the parent
//! module.

pub fn navbar() -> String {
    r##"<nav id="navbar">
  <strong>Stackpilot</strong>
  <div>
    <a href="#features">Features</a>
    <a href="#how-it-works">How it works</a>
    <a href="#cta" class="btn">Get started</a>
  </div>
</nav>"##
        .to_string()
}

pub fn hero() -> String {
    r##"<section id="hero">
  <h1>Ship your side project faster</h1>
  <p class="muted">Stackpilot gives you a ready-made backend: users, queries,
  auth and a landing page, so you can spend your weekend on the product
  instead of the plumbing.</p>
  <a href="#cta" class="btn">Start building</a>
</section>"##
        .to_string()
}

pub fn features() -> String {
    r##"<section id="features">
  <h2>Everything a small product needs</h2>
  <div class="grid">
    <div class="card"><h3>Instant REST</h3><p class="muted">CRUD endpoints with search, filtering, sorting and pagination out of the box.</p></div>
    <div class="card"><h3>Secure by default</h3><p class="muted">Hashed passwords and token-based auth with no configuration.</p></div>
    <div class="card"><h3>Uniform errors</h3><p class="muted">Every failure comes back in one predictable shape your frontend can rely on.</p></div>
    <div class="card"><h3>Zero infrastructure</h3><p class="muted">A single binary. No database server, no queue, no cluster.</p></div>
  </div>
</section>"##
        .to_string()
}

pub fn how_it_works() -> String {
    r##"<section id="how-it-works">
  <h2>How it works</h2>
  <div class="grid">
    <div class="card"><h3>1. Run</h3><p class="muted">Start the server with one command.</p></div>
    <div class="card"><h3>2. Model</h3><p class="muted">Create users and documents over plain HTTP.</p></div>
    <div class="card"><h3>3. Query</h3><p class="muted">Search, filter and paginate with query-string parameters.</p></div>
  </div>
</section>"##
        .to_string()
}

pub fn testimonials() -> String {
    r##"<section id="testimonials">
  <h2>What builders say</h2>
  <div class="grid">
    <div class="card"><blockquote>"I had a working API before my coffee went cold."</blockquote><p class="muted">— Priya, indie hacker</p></div>
    <div class="card"><blockquote>"The uniform error shape saved us a whole layer of frontend glue."</blockquote><p class="muted">— Jonas, freelance developer</p></div>
  </div>
</section>"##
        .to_string()
}

pub fn cta() -> String {
    r##"<section id="cta">
  <h2>Ready to ship?</h2>
  <p class="muted">Spin up Stackpilot and have an API in minutes.</p>
  <a href="/api/users" class="btn">Try the API</a>
</section>"##
        .to_string()
}

pub fn footer() -> String {
    r##"<footer id="footer">
  <p class="muted">© Stackpilot. Built for people who ship.</p>
</footer>"##
        .to_string()
}
