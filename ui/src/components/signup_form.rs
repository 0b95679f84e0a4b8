use payloads::requests::StartCheckout;
use payloads::{Event, PriceType};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::CalendarLinks;
use crate::config::{ApiContext, use_api_client};
use crate::state::{SIGNUP_THANKS, SignupAction, SignupState, SignupStep};

#[derive(Properties, PartialEq)]
pub struct SignupFormProps {
    pub event: Event,
}

#[function_component]
pub fn SignupForm(props: &SignupFormProps) -> Html {
    let api = use_api_client();
    let state = use_reducer(SignupState::default);
    let price_type = props.event.effective_price_type();

    let on_input = |action: fn(String) -> SignupAction| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(action(input.value()));
        })
    };

    let on_submit = {
        let state = state.clone();
        let event = props.event.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if state.status.is_submitting() {
                return;
            }

            let step = match state.next_step(&event) {
                Ok(step) => step,
                Err(errors) => {
                    state.dispatch(SignupAction::Rejected(errors));
                    return;
                }
            };

            state.dispatch(SignupAction::Submitting);
            let state = state.clone();
            let api = api.clone();
            let event_title = event.title.clone();
            yew::platform::spawn_local(async move {
                let checkout = match step {
                    // The signup is already recorded; only payment is left.
                    SignupStep::Checkout(checkout) => checkout,
                    SignupStep::Signup(signup) => {
                        if let Err(e) = api.create_signup(&signup).await {
                            tracing::warn!("Signup failed: {e}");
                            state.dispatch(SignupAction::Failed(e.to_string()));
                            return;
                        }
                        match signup.amount_pence.filter(|pence| *pence > 0) {
                            Some(amount_pence) => StartCheckout {
                                event_title,
                                amount_pence,
                            },
                            None => {
                                state.dispatch(SignupAction::Succeeded);
                                return;
                            }
                        }
                    }
                };

                if let Err(message) = redirect_to_checkout(&api, &checkout).await {
                    state.dispatch(SignupAction::CheckoutFailed { checkout, message });
                }
            });
        })
    };

    let submitting = state.status.is_submitting();

    html! {
        <section class="mt-8 bg-white rounded-lg border border-gray-200 p-6">
            <h2 class="text-xl font-semibold mb-4">{"Sign Up"}</h2>
            <form onsubmit={on_submit} class="space-y-4" novalidate=true>
                <div>
                    <label for="name" class="block text-sm font-medium text-gray-700">{"Your Name"}</label>
                    <input
                        id="name"
                        type="text"
                        value={state.form.name.clone()}
                        oninput={on_input(SignupAction::Name)}
                        class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2"
                    />
                    <FieldError message={state.errors.name} />
                </div>
                <div>
                    <label for="email" class="block text-sm font-medium text-gray-700">{"Email Address"}</label>
                    <input
                        id="email"
                        type="email"
                        value={state.form.email.clone()}
                        oninput={on_input(SignupAction::Email)}
                        class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2"
                    />
                    <FieldError message={state.errors.email} />
                </div>
                if price_type == PriceType::Donation {
                    <div>
                        <label for="amount" class="block text-sm font-medium text-gray-700">{"Pay what you feel (£)"}</label>
                        <input
                            id="amount"
                            type="text"
                            inputmode="decimal"
                            placeholder="0.00"
                            value={state.form.amount.clone()}
                            oninput={on_input(SignupAction::Amount)}
                            class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2"
                        />
                        <FieldError message={state.errors.amount} />
                    </div>
                }
                if let Some(error) = state.status.error() {
                    <p class="text-sm text-red-600" role="alert">{error}</p>
                }
                <button
                    type="submit"
                    disabled={submitting}
                    class="px-4 py-2 rounded-md bg-indigo-600 text-white font-medium hover:bg-indigo-700 disabled:opacity-50"
                >
                    {if submitting { "Submitting…" } else { "Sign Up" }}
                </button>
            </form>
            if state.signed_up() {
                <div class="mt-6">
                    <p class="text-green-700 font-medium" role="status">{SIGNUP_THANKS}</p>
                    <CalendarLinks event={props.event.clone()} />
                </div>
            }
        </section>
    }
}

/// Start a hosted checkout and send the browser there.
async fn redirect_to_checkout(
    api: &ApiContext,
    checkout: &StartCheckout,
) -> Result<(), String> {
    let session = api.start_checkout(checkout).await.map_err(|e| {
        tracing::warn!("Checkout failed: {e}");
        e.to_string()
    })?;

    tracing::info!("Redirecting to checkout");
    web_sys::window()
        .ok_or_else(|| "No browser window".to_string())?
        .location()
        .set_href(&session.url)
        .map_err(|_| "Could not open checkout".to_string())
}

#[derive(Properties, PartialEq)]
struct FieldErrorProps {
    message: Option<&'static str>,
}

#[function_component]
fn FieldError(props: &FieldErrorProps) -> Html {
    match props.message {
        Some(message) => html! {
            <p class="mt-1 text-sm text-red-600">{message}</p>
        },
        None => html! {},
    }
}
