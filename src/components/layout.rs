//! Dashboard shell shared by every page.

use leptos::prelude::*;
use leptos_router::components::A;

/// Sidebar destinations, in display order.
pub const NAV_LINKS: [(&str, &str); 5] = [
	("/dashboard", "Dashboard Overview"),
	("/record", "Record New Story"),
	("/story_library", "Story Library"),
	("/timeline_home", "Timeline"),
	("/family", "Family Tree"),
];

/// Dashboard shell: brand and navigation on the left, page content on the right.
#[component]
pub fn Sidebar(children: Children) -> impl IntoView {
	view! {
		<div class="dashboard">
			<aside class="sidebar">
				<div class="brand">
					<span class="brand-name">"VirsaAI"</span>
				</div>
				<nav class="sidebar-nav">
					{NAV_LINKS
						.into_iter()
						.map(|(href, label)| view! { <A href=href>{label}</A> })
						.collect_view()}
				</nav>
				<div class="sidebar-footer">
					<p>"New updates available! Explore the refreshed story generator."</p>
				</div>
			</aside>
			<main class="dashboard-main">{children()}</main>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_link_is_an_absolute_route() {
		for (href, label) in NAV_LINKS {
			assert!(href.starts_with('/') && !href.ends_with('/'), "{href}");
			assert!(!label.is_empty());
		}
		assert!(NAV_LINKS.iter().any(|(href, _)| *href == "/family"));
	}
}
