//! Full `index.html` page around the rendered tree

use super::tree::escape_html;

/// Values substituted into the page template
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub timestamp: &'a str,

    /// Minute label for the build time; inserted as markup (may contain `<br>`)
    pub minute_label: &'a str,

    pub tree_html: &'a str,

    /// Favicon URL; no `<link rel="icon">` when `None`
    pub icon: Option<&'a str>,
}

const STYLE: &str = r#"		* {
			margin: 0;
			padding: 0;
		}
		body {
			font-family: Arial, sans-serif;
			background: linear-gradient(to right, #1a1a1a, #1e1e1e, #1e2e2e);
			color: #fff;
			text-align: center;
			min-height: 100vh;
			display: flex;
			flex-direction: column;
			justify-content: center;
			align-items: center;
		}
		body > * {
			padding: 0.5rem;
		}
		h1 {
			font-size: 3rem;
			color: #1db954;
		}
		p {
			font-size: 1.2rem;
			padding: 0;
			margin-bottom: 0.5rem;
		}
		.minute-label {
			font-size: 0.9rem;
			color: #9a9a9a;
			letter-spacing: 0.05rem;
		}
		a {
			color: cornflowerblue;
			text-decoration: none;
		}
		a:hover,
		a:active {
			color: lightblue;
		}
		.directory {
			font-family: 'Courier New', monospace;
			text-align: left;
			background: rgba(0, 0, 0, 0.3);
			padding: 1rem;
			border-radius: 8px;
			max-width: 600px;
			margin: 1rem auto;
			line-height: 1.4;
			white-space: pre-wrap;
		}
		.expand-collapse-all {
			display: block;
			margin: 0.5rem auto 1rem auto;
			padding: 0.5rem 1rem;
			background: #1db954;
			color: white;
			border: none;
			border-radius: 4px;
			cursor: pointer;
			font-size: 0.9rem;
			transition: background-color 0.2s;
		}
		.expand-collapse-all:hover {
			background: #1ed760;
		}
		.dir-toggle,
		.dir-name {
			cursor: pointer;
			color: #1db954;
			font-weight: bold;
		}
		.dir-toggle {
			margin-right: 0.2rem;
		}
		.dir-toggle:hover,
		.dir-name:hover {
			color: #1ed760;
		}
		.dir-content {
			margin-left: 1rem;
		}
		.dir-content.collapsed {
			display: none;
		}
		.dir-content.expanded {
			display: block;
		}
"#;

const SCRIPT: &str = r#"		function setExpanded(element, expanded) {
			const toggle = element.previousElementSibling.previousElementSibling;
			element.classList.toggle('collapsed', !expanded);
			element.classList.toggle('expanded', expanded);
			if (toggle) toggle.textContent = expanded ? '▼' : '▶';
			if (expanded) {
				localStorage.setItem(element.id, 'expanded');
			} else {
				localStorage.removeItem(element.id);
			}
		}

		function toggleDirectory(dirId) {
			const element = document.getElementById(dirId);
			setExpanded(element, element.classList.contains('collapsed'));
			updateExpandAllButton();
		}

		function toggleAllDirectories() {
			const button = document.querySelector('.expand-collapse-all');
			const expanding = button.textContent === 'Expand All';
			document.querySelectorAll('.dir-content').forEach(content => setExpanded(content, expanding));
			button.textContent = expanding ? 'Collapse All' : 'Expand All';
		}

		function updateExpandAllButton() {
			const button = document.querySelector('.expand-collapse-all');
			const expanded = document.querySelectorAll('.dir-content.expanded').length;
			const total = document.querySelectorAll('.dir-content').length;
			button.textContent = total > 0 && expanded === total ? 'Collapse All' : 'Expand All';
		}

		window.addEventListener('pageshow', function(event) {
			updateExpandAllButton();
			if (!event.persisted) return;
			setTimeout(() => {
				Object.keys(localStorage)
					.filter(key => key.startsWith('dir_'))
					.forEach(dirId => {
						const element = document.getElementById(dirId);
						if (element && element.classList.contains('collapsed')) {
							setExpanded(element, true);
						}
					});
				updateExpandAllButton();
			}, 50);
		});
"#;

/// Render the complete page
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let title = escape_html(ctx.title);
    let icon = ctx
        .icon
        .map(|href| format!("\t<link rel=\"icon\" href=\"{}\">\n", escape_html(href)))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
	<meta charset="UTF-8">
	<meta name="viewport" content="width=device-width, initial-scale=1.0">
	<title>{title}</title>
{icon}	<style>
{STYLE}	</style>
</head>
<body>
	<h1>{title}</h1>
	<p class="updated">{timestamp}</p>
	<p class="minute-label">{label}</p>
	<a href="" style="margin-top: 0.5rem; font-size: 1.5em;">Refresh</a>
	<div class="directory"><button class="expand-collapse-all" onclick="toggleAllDirectories()">Expand All</button>{tree}	</div>
	<script>
{SCRIPT}	</script>
</body>
</html>
"#,
        timestamp = escape_html(ctx.timestamp),
        label = ctx.minute_label,
        tree = ctx.tree_html,
    )
}
