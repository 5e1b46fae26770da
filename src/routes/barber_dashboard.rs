//! Shop management for the barber role: first visit creates the shop,
//! later visits edit it and grow the service list. Reachable only through
//! the session guard plus the barber role check.

use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::state::use_auth;
use crate::features::auth::{RequireBarber, RequireSession};
use crate::features::shops::client;
use crate::features::shops::types::{Service, Shop, ShopPayload};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

/// String-typed mirror of the shop form inputs.
#[derive(Clone, Default, PartialEq)]
struct ShopForm {
    name: String,
    description: String,
    address: String,
    city: String,
    state: String,
    zip_code: String,
    phone: String,
    email: String,
    image_url: String,
    latitude: String,
    longitude: String,
}

impl ShopForm {
    fn from_shop(shop: &Shop) -> Self {
        Self {
            name: shop.name.clone(),
            description: shop.description.clone().unwrap_or_default(),
            address: shop.address.clone(),
            city: shop.city.clone(),
            state: shop.state.clone().unwrap_or_default(),
            zip_code: shop.zip_code.clone().unwrap_or_default(),
            phone: shop.phone.clone().unwrap_or_default(),
            email: shop.email.clone().unwrap_or_default(),
            image_url: shop.image_url.clone().unwrap_or_default(),
            latitude: String::new(),
            longitude: String::new(),
        }
    }

    fn to_payload(&self) -> Result<ShopPayload, AppError> {
        let name = self.name.trim();
        let address = self.address.trim();
        let city = self.city.trim();
        if name.is_empty() || address.is_empty() || city.is_empty() {
            return Err(AppError::Validation(
                "Shop name, address and city are required.".to_string(),
            ));
        }

        Ok(ShopPayload {
            name: name.to_string(),
            description: none_if_empty(&self.description),
            address: address.to_string(),
            city: city.to_string(),
            state: none_if_empty(&self.state),
            zip_code: none_if_empty(&self.zip_code),
            phone: none_if_empty(&self.phone),
            email: none_if_empty(&self.email),
            image_url: none_if_empty(&self.image_url),
            latitude: self.latitude.trim().parse().ok(),
            longitude: self.longitude.trim().parse().ok(),
            services: Vec::new(),
        })
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn build_service(
    name: &str,
    description: &str,
    price: &str,
    duration: &str,
) -> Result<Service, AppError> {
    let name = name.trim();
    let price: f64 = price.trim().parse().unwrap_or(-1.0);
    let duration: u32 = duration.trim().parse().unwrap_or(0);
    if name.is_empty() || price < 0.0 || duration == 0 {
        return Err(AppError::Validation(
            "Please fill all service fields".to_string(),
        ));
    }

    Ok(Service {
        id: None,
        name: name.to_string(),
        description: none_if_empty(description),
        price,
        duration,
    })
}

#[derive(Clone)]
struct SaveInput {
    shop_id: Option<String>,
    payload: ShopPayload,
}

#[component]
pub fn BarberDashboardPage() -> impl IntoView {
    view! {
        <AppShell>
            <RequireSession>
                <RequireBarber>
                    <ShopManager />
                </RequireBarber>
            </RequireSession>
        </AppShell>
    }
}

#[component]
fn ShopManager() -> impl IntoView {
    let auth = use_auth();
    let (show_form, set_show_form) = signal(false);
    let (error, set_error) = signal::<Option<AppError>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let form = RwSignal::new(ShopForm::default());
    let (service_name, set_service_name) = signal(String::new());
    let (service_description, set_service_description) = signal(String::new());
    let (service_price, set_service_price) = signal(String::new());
    let (service_duration, set_service_duration) = signal(String::new());

    let load = LocalResource::new(move || async move {
        let manager = auth.manager();
        client::my_shop(manager.api()).await
    });

    // Seed the form from the fetched shop; no shop yet means create mode.
    Effect::new(move |_| {
        if let Some(result) = load.get() {
            match result {
                Ok(Some(shop)) => {
                    form.set(ShopForm::from_shop(&shop));
                    set_show_form.set(false);
                }
                Ok(None) => set_show_form.set(true),
                Err(_) => {}
            }
        }
    });

    let save = Action::new_local(move |input: &SaveInput| {
        let input = input.clone();
        async move {
            let manager = auth.manager();
            match &input.shop_id {
                Some(id) => client::update_shop(manager.api(), id, &input.payload).await,
                None => client::create_shop(manager.api(), &input.payload).await,
            }
        }
    });
    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(()) => {
                    set_error.set(None);
                    set_notice.set(Some("Shop saved.".to_string()));
                    load.refetch();
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let add_service = Action::new_local(move |input: &(String, Service)| {
        let (shop_id, service) = input.clone();
        async move {
            let manager = auth.manager();
            client::add_service(manager.api(), &shop_id, &service).await
        }
    });
    Effect::new(move |_| {
        if let Some(result) = add_service.value().get() {
            match result {
                Ok(()) => {
                    set_error.set(None);
                    set_notice.set(Some("Service added.".to_string()));
                    set_service_name.set(String::new());
                    set_service_description.set(String::new());
                    set_service_price.set(String::new());
                    set_service_duration.set(String::new());
                    load.refetch();
                }
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let current_shop = Signal::derive(move || load.get().and_then(Result::ok).flatten());

    let on_save = move |event: SubmitEvent| {
        event.prevent_default();
        set_notice.set(None);
        match form.with_untracked(ShopForm::to_payload) {
            Ok(payload) => {
                set_error.set(None);
                save.dispatch(SaveInput {
                    shop_id: current_shop.get_untracked().map(|shop| shop.id),
                    payload,
                });
            }
            Err(err) => set_error.set(Some(err)),
        }
    };

    let on_add_service = move |_| {
        set_notice.set(None);
        let Some(shop) = current_shop.get_untracked() else {
            return;
        };
        match build_service(
            &service_name.get_untracked(),
            &service_description.get_untracked(),
            &service_price.get_untracked(),
            &service_duration.get_untracked(),
        ) {
            Ok(service) => {
                set_error.set(None);
                add_service.dispatch((shop.id, service));
            }
            Err(err) => set_error.set(Some(err)),
        }
    };

    let text_input = "bg-white border border-stone-300 text-stone-900 text-sm rounded-lg focus:ring-amber-500 focus:border-amber-500 block w-full p-2.5";

    let shop_form = move || {
        let editing = current_shop.get().is_some();
        view! {
            <form class="space-y-4 max-w-xl" on:submit=on_save>
                <h2 class="text-xl font-semibold text-stone-900">
                    {if editing { "Edit Shop" } else { "Create Your Shop" }}
                </h2>
                <div>
                    <label class="block mb-1 text-sm font-medium text-stone-900">"Shop Name *"</label>
                    <input
                        type="text"
                        class=text_input
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </div>
                <div>
                    <label class="block mb-1 text-sm font-medium text-stone-900">"Description"</label>
                    <textarea
                        class=text_input
                        rows="3"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                </div>
                <div class="grid sm:grid-cols-2 gap-4">
                    <div>
                        <label class="block mb-1 text-sm font-medium text-stone-900">"Address *"</label>
                        <input
                            type="text"
                            class=text_input
                            prop:value=move || form.with(|f| f.address.clone())
                            on:input=move |ev| form.update(|f| f.address = event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block mb-1 text-sm font-medium text-stone-900">"City *"</label>
                        <input
                            type="text"
                            class=text_input
                            prop:value=move || form.with(|f| f.city.clone())
                            on:input=move |ev| form.update(|f| f.city = event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block mb-1 text-sm font-medium text-stone-900">"State"</label>
                        <input
                            type="text"
                            class=text_input
                            prop:value=move || form.with(|f| f.state.clone())
                            on:input=move |ev| form.update(|f| f.state = event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block mb-1 text-sm font-medium text-stone-900">"Zip Code"</label>
                        <input
                            type="text"
                            class=text_input
                            prop:value=move || form.with(|f| f.zip_code.clone())
                            on:input=move |ev| form.update(|f| f.zip_code = event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block mb-1 text-sm font-medium text-stone-900">"Phone"</label>
                        <input
                            type="tel"
                            class=text_input
                            prop:value=move || form.with(|f| f.phone.clone())
                            on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block mb-1 text-sm font-medium text-stone-900">"Email"</label>
                        <input
                            type="email"
                            class=text_input
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block mb-1 text-sm font-medium text-stone-900">"Latitude"</label>
                        <input
                            type="text"
                            class=text_input
                            prop:value=move || form.with(|f| f.latitude.clone())
                            on:input=move |ev| form.update(|f| f.latitude = event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block mb-1 text-sm font-medium text-stone-900">"Longitude"</label>
                        <input
                            type="text"
                            class=text_input
                            prop:value=move || form.with(|f| f.longitude.clone())
                            on:input=move |ev| form.update(|f| f.longitude = event_target_value(&ev))
                        />
                    </div>
                </div>
                <div>
                    <label class="block mb-1 text-sm font-medium text-stone-900">"Image URL"</label>
                    <input
                        type="url"
                        class=text_input
                        placeholder="https://example.com/image.jpg"
                        prop:value=move || form.with(|f| f.image_url.clone())
                        on:input=move |ev| form.update(|f| f.image_url = event_target_value(&ev))
                    />
                </div>
                <div class="flex gap-3">
                    <Button button_type="submit" disabled=save.pending()>
                        {move || {
                            if current_shop.get().is_some() { "Update Shop" } else { "Create Shop" }
                        }}
                    </Button>
                    <Show when=move || current_shop.get().is_some()>
                        <button
                            type="button"
                            class="px-4 py-2 rounded-lg border border-stone-300 text-stone-700 hover:bg-stone-100 text-sm"
                            on:click=move |_| set_show_form.set(false)
                        >
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>
        }
    };

    let shop_details = move |shop: Shop| {
        view! {
            <div class="space-y-6 max-w-2xl">
                <div class="flex items-center justify-between">
                    <h2 class="text-xl font-semibold text-stone-900">{shop.name.clone()}</h2>
                    <button
                        type="button"
                        class="px-4 py-2 rounded-lg border border-stone-300 text-stone-700 hover:bg-stone-100 text-sm"
                        on:click=move |_| set_show_form.set(true)
                    >
                        "Edit Shop"
                    </button>
                </div>
                <div class="text-sm text-stone-700 space-y-1">
                    <p>
                        <strong>"Description: "</strong>
                        {shop.description.clone().unwrap_or_else(|| "No description".to_string())}
                    </p>
                    <p>
                        <strong>"Address: "</strong>
                        {shop.address.clone()} ", " {shop.city.clone()}
                    </p>
                    {shop
                        .phone
                        .clone()
                        .map(|phone| view! { <p><strong>"Phone: "</strong>{phone}</p> })}
                    {shop
                        .email
                        .clone()
                        .map(|email| view! { <p><strong>"Email: "</strong>{email}</p> })}
                    <p>
                        <strong>"Rating: "</strong>
                        {if shop.rating > 0.0 {
                            format!("⭐ {:.1}", shop.rating)
                        } else {
                            "No ratings yet".to_string()
                        }}
                    </p>
                </div>

                <div>
                    <h3 class="text-lg font-semibold text-stone-900 mb-3">"Services"</h3>
                    {if shop.services.is_empty() {
                        view! { <p class="text-sm text-stone-500">"No services added yet"</p> }
                            .into_any()
                    } else {
                        shop.services
                            .iter()
                            .map(|service| {
                                view! {
                                    <div class="py-2 border-b border-stone-100 text-sm">
                                        <strong>{service.name.clone()}</strong>
                                        " - $" {service.price}
                                        <p class="text-stone-500">
                                            {service
                                                .description
                                                .clone()
                                                .unwrap_or_else(|| "No description".to_string())}
                                        </p>
                                        <small class="text-stone-400">
                                            "Duration: " {service.duration} " minutes"
                                        </small>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}

                    <div class="mt-6 space-y-3">
                        <h4 class="font-medium text-stone-900">"Add New Service"</h4>
                        <div class="grid sm:grid-cols-3 gap-3">
                            <input
                                type="text"
                                class=text_input
                                placeholder="Service Name"
                                prop:value=move || service_name.get()
                                on:input=move |ev| set_service_name.set(event_target_value(&ev))
                            />
                            <input
                                type="number"
                                class=text_input
                                placeholder="Price ($)"
                                prop:value=move || service_price.get()
                                on:input=move |ev| set_service_price.set(event_target_value(&ev))
                            />
                            <input
                                type="number"
                                class=text_input
                                placeholder="Duration (minutes)"
                                prop:value=move || service_duration.get()
                                on:input=move |ev| set_service_duration.set(event_target_value(&ev))
                            />
                        </div>
                        <textarea
                            class=text_input
                            rows="2"
                            placeholder="Service Description (optional)"
                            prop:value=move || service_description.get()
                            on:input=move |ev| set_service_description.set(event_target_value(&ev))
                        ></textarea>
                        <button
                            type="button"
                            class="text-white bg-amber-700 hover:bg-amber-800 font-medium rounded-lg text-sm px-5 py-2.5"
                            disabled=move || add_service.pending().get()
                            on:click=on_add_service
                        >
                            "Add Service"
                        </button>
                    </div>
                </div>
            </div>
        }
    };

    view! {
        <h1 class="text-2xl font-bold text-stone-900 mb-6">"My Shop Management"</h1>
        {move || {
            notice
                .get()
                .map(|message| {
                    view! {
                        <div class="mb-4">
                            <Alert kind=AlertKind::Success message=message />
                        </div>
                    }
                })
        }}
        {move || {
            error
                .get()
                .map(|err| {
                    view! {
                        <div class="mb-4">
                            <Alert kind=AlertKind::Error message=err.to_string() />
                        </div>
                    }
                })
        }}
        {move || match load.get() {
            None => view! { <div class="py-8 text-center"><Spinner /></div> }.into_any(),
            Some(Err(err)) => {
                view! { <Alert kind=AlertKind::Error message=err.to_string() /> }.into_any()
            }
            Some(Ok(None)) => shop_form().into_any(),
            Some(Ok(Some(shop))) => {
                if show_form.get() {
                    shop_form().into_any()
                } else {
                    shop_details(shop).into_any()
                }
            }
        }}
    }
}
