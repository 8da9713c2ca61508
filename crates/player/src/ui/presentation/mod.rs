//! Presentation layer - Dioxus UI components and site styles

pub mod components;

/// Site-wide stylesheet, injected once by the app root
pub const SITE_CSS: &str = r#"
:root { color-scheme: dark; --accent: #7c3aed; --accent-2: #22d3ee; --bg: #07070f; --panel: #12121f; }
* { box-sizing: border-box; }
body { margin: 0; background: var(--bg); color: #e5e7eb; font-family: system-ui, sans-serif; }
a { color: inherit; }
.site { min-height: 100vh; display: flex; flex-direction: column; }
.site-header { display: flex; align-items: center; justify-content: space-between; padding: 1rem 2rem; }
.site--mobile .site-header { padding: 0.75rem 1rem; }
.site-brand { font-weight: 800; text-decoration: none; letter-spacing: 0.05em; }
.site-nav { display: flex; gap: 1.25rem; }
.site-main { flex: 1; }
.site-footer { padding: 1.5rem 2rem; text-align: center; opacity: 0.6; font-size: 0.85rem; }
.page { max-width: 72rem; margin: 0 auto; padding: 2rem; }
.page--center { text-align: center; }
.hero { text-align: center; padding: 6rem 2rem 4rem; }
.hero-title { font-size: clamp(2.5rem, 8vw, 5rem); margin: 0; }
.hero-title__accent { background: linear-gradient(90deg, var(--accent), var(--accent-2)); -webkit-background-clip: text; color: transparent; }
.hero-tagline { font-size: 1.25rem; opacity: 0.8; }
.hero-actions { display: flex; gap: 1rem; justify-content: center; margin-top: 2rem; flex-wrap: wrap; }
.token-card, .variant-option { background: var(--panel); border-radius: 0.75rem; padding: 1.5rem; }
.token-card { margin-bottom: 2rem; }
.tokenomics-header { text-align: center; margin-bottom: 3rem; }
.tokenomics-subtitle { font-size: 1.25rem; opacity: 0.7; }
.token-block { background: #ffffff0d; border-radius: 0.5rem; padding: 1.25rem; margin-bottom: 1.25rem; }
.series-list { list-style: none; padding: 0; }
.dot { display: inline-block; width: 1rem; height: 1rem; border-radius: 999px; margin-right: 0.75rem; vertical-align: middle; }
.dot--blue { background: #3b82f6; }
.dot--purple { background: #a855f7; }
.dot--green { background: #22c55e; }
.btn { display: inline-block; border: 0; border-radius: 0.5rem; padding: 0.75rem 1.5rem; font-weight: 700; cursor: pointer; text-decoration: none; }
.btn--primary { background: var(--accent); color: white; }
.btn--ghost { background: transparent; color: inherit; outline: 1px solid #ffffff33; }
.btn:disabled { opacity: 0.5; cursor: not-allowed; }
.variant-selector { display: grid; gap: 1rem; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); margin-bottom: 1.5rem; }
.variant-option { text-align: left; color: inherit; border: 2px solid transparent; cursor: pointer; }
.variant-option--selected { border-color: var(--accent); }
.game-panel { position: relative; width: 100%; aspect-ratio: 16 / 9; background: black; border-radius: 0.75rem; overflow: hidden; }
.game-panel--hidden { display: none; }
.game-panel--pinned { position: fixed; inset: 0; width: 100vw; height: 100vh; aspect-ratio: auto; border-radius: 0; z-index: 1000; }
.game-mount { width: 100%; height: 100%; }
.overlay { position: absolute; z-index: 10; }
.game-panel--pinned .overlay { position: fixed; }
.overlay-hint { inset: 0; display: flex; align-items: center; justify-content: center; background: #00000088; font-weight: 700; z-index: 5; }
.overlay-hint__close { position: absolute; top: 0.5rem; right: 0.5rem; background: transparent; color: white; border: 0; font-size: 1rem; cursor: pointer; }
.overlay-hint__body { text-align: center; padding: 1rem; cursor: pointer; }
.overlay-hint__icon { display: block; font-size: 3rem; }
.overlay-toggle { top: 0.75rem; right: 0.75rem; background: #00000099; color: white; border: 0; border-radius: 0.5rem; padding: 0.5rem 0.75rem; cursor: pointer; }
.overlay-badge { top: 0.75rem; left: 0.75rem; background: #f59e0b; color: black; font-weight: 800; padding: 0.25rem 0.5rem; border-radius: 0.25rem; }
.overlay-rotate { inset: 0; display: flex; flex-direction: column; align-items: center; justify-content: center; background: #000000ee; z-index: 20; text-align: center; padding: 2rem; }
.overlay-loading { left: 50%; top: 50%; transform: translate(-50%, -50%); width: 60%; text-align: center; z-index: 15; }
.progress { height: 0.5rem; background: #ffffff22; border-radius: 999px; overflow: hidden; margin-top: 0.5rem; }
.progress-bar { height: 100%; background: linear-gradient(90deg, var(--accent), var(--accent-2)); }
.overlay-error { z-index: 15; left: 1rem; right: 1rem; bottom: 1rem; background: #7f1d1d; color: white; padding: 1rem; border-radius: 0.5rem; }
.game-controls { margin-top: 1rem; display: flex; gap: 1rem; }
.error-fallback { text-align: center; padding: 4rem 2rem; }
.error-details { font-family: monospace; font-size: 0.8rem; opacity: 0.6; white-space: pre-wrap; }
"#;
