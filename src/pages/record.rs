use leptos::prelude::*;

use crate::components::layout::Sidebar;

const TIPS: [&str; 4] = [
	"Speak naturally at a comfortable pace",
	"Minimize background noise if possible",
	"Share memories, people, dates, and cultural details",
	"You can always edit or add more later",
];

/// Recording guidance. Capture and upload go straight to the backend's
/// transcription service, which this client does not drive.
#[component]
pub fn RecordPage() -> impl IntoView {
	view! {
		<Sidebar>
			<div class="page">
				<h1 class="page-title">"Record a New Story"</h1>
				<p class="page-subtitle">
					"Capture spoken memories directly or upload a recording. VirsaAI will "
					"transcribe, translate, and save your story."
				</p>
				<section class="tips">
					<h2>"Tips for Recording"</h2>
					<ul>{TIPS.into_iter().map(|tip| view! { <li>{tip}</li> }).collect_view()}</ul>
					<p class="tip">
						"Pro Tip: Start by describing the setting of your story: where you were, "
						"who was there, and how you felt."
					</p>
				</section>
			</div>
		</Sidebar>
	}
}
