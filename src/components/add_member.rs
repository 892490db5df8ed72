//! Add-member form: field validation, submission state and the modal.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use thiserror::Error;

use crate::api::{ApiError, CreatedMember, NewMember, create_member};
use crate::config::ApiConfig;

/// Why the typed fields cannot be sent yet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
	/// Name left blank.
	#[error("Name is required")]
	MissingName,

	/// Birth year is not an integer; carries the trimmed input.
	#[error("Birth year must be a whole number, got {0:?}")]
	BirthYear(String),
}

/// Add-member form fields exactly as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemberDraft {
	/// Name input.
	pub name: String,
	/// Relationship input.
	pub relationship: String,
	/// Birth year input.
	pub birth_year: String,
}

impl MemberDraft {
	/// Turn the typed fields into a creation request.
	pub fn validate(&self) -> Result<NewMember, DraftError> {
		let name = self.name.trim();
		if name.is_empty() {
			return Err(DraftError::MissingName);
		}
		let relationship = Some(self.relationship.trim())
			.filter(|r| !r.is_empty())
			.map(str::to_owned);
		let birth_year = match self.birth_year.trim() {
			"" => None,
			year => Some(
				year.parse::<i32>()
					.map_err(|_| DraftError::BirthYear(year.to_owned()))?,
			),
		};
		Ok(NewMember {
			name: name.to_owned(),
			relationship,
			birth_year,
		})
	}

	/// Whether the name is filled in.
	pub fn can_submit(&self) -> bool {
		!self.name.trim().is_empty()
	}
}

/// Everything the modal shows: the typed draft, whether a request is in
/// flight, and the last error message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
	/// Fields as typed.
	pub draft: MemberDraft,
	/// A creation request is in flight.
	pub saving: bool,
	/// Message shown under the fields.
	pub error: Option<String>,
}

impl FormState {
	/// Start a submission. Returns the request to send, or `None` when one is
	/// already in flight or the draft is invalid (the error is then set).
	pub fn submit(&mut self) -> Option<NewMember> {
		if self.saving {
			return None;
		}
		match self.draft.validate() {
			Ok(request) => {
				self.saving = true;
				self.error = None;
				Some(request)
			}
			Err(e) => {
				self.error = Some(e.to_string());
				None
			}
		}
	}

	/// Apply the backend's answer. On success the draft is cleared and the new
	/// id returned; on failure the draft is kept and the message shown.
	pub fn settle(&mut self, result: Result<CreatedMember, ApiError>) -> Option<i64> {
		self.saving = false;
		match result {
			Ok(created) => {
				self.draft = MemberDraft::default();
				self.error = None;
				Some(created.id)
			}
			Err(e) => {
				self.error = Some(e.to_string());
				None
			}
		}
	}

	/// Whether the create button is enabled.
	pub fn can_submit(&self) -> bool {
		!self.saving && self.draft.can_submit()
	}
}

/// Modal collecting a new family member. Stays mounted while hidden so typed
/// fields survive closing and reopening.
#[component]
pub fn AddMemberModal(
	#[prop(into)] open: Signal<bool>,
	on_close: Callback<()>,
	on_created: Callback<i64>,
) -> impl IntoView {
	let config = StoredValue::new(use_context::<ApiConfig>().unwrap_or_default());
	let form = RwSignal::new(FormState::default());

	let save = move |_| {
		let mut request = None;
		form.update(|f| request = f.submit());
		let Some(request) = request else {
			return;
		};
		let config = config.get_value();
		spawn_local(async move {
			let result = create_member(&config, &request).await;
			match &result {
				Ok(created) => info!("created member {} ({})", created.id, request.name),
				Err(e) => warn!("member creation failed: {e}"),
			}
			let mut created = None;
			form.update(|f| created = f.settle(result));
			if let Some(id) = created {
				on_created.run(id);
				on_close.run(());
			}
		});
	};

	view! {
		<Show when=move || open.get()>
			<div class="modal">
				<div class="modal-backdrop" on:click=move |_| on_close.run(()) />
				<div class="modal-panel">
					<h2>"Add Family Member"</h2>

					<label>"Name"</label>
					<input
						prop:value=move || form.with(|f| f.draft.name.clone())
						on:input=move |ev| form.update(|f| f.draft.name = event_target_value(&ev))
					/>

					<label>"Relationship"</label>
					<input
						placeholder="parent, sibling, child..."
						prop:value=move || form.with(|f| f.draft.relationship.clone())
						on:input=move |ev| form.update(|f| f.draft.relationship = event_target_value(&ev))
					/>

					<label>"Birth Year"</label>
					<input
						type="number"
						prop:value=move || form.with(|f| f.draft.birth_year.clone())
						on:input=move |ev| form.update(|f| f.draft.birth_year = event_target_value(&ev))
					/>

					{move || form.with(|f| f.error.clone()).map(|msg| view! { <p class="form-error">{msg}</p> })}

					<div class="modal-actions">
						<button
							class="button-secondary"
							on:click=move |_| on_close.run(())
							disabled=move || form.with(|f| f.saving)
						>
							"Cancel"
						</button>
						<button
							class="button-primary"
							on:click=save
							disabled=move || !form.with(FormState::can_submit)
						>
							{move || if form.with(|f| f.saving) { "Saving..." } else { "Create" }}
						</button>
					</div>
				</div>
			</div>
		</Show>
	}
}
