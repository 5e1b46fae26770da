//! Public landing page: hero, search, and the shop directory. Browsing works
//! signed out; the cards only read public listing data.

use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::auth::state::use_auth;
use crate::features::shops::client;
use crate::features::shops::types::Shop;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <AppShell>
            <LandingContent />
        </AppShell>
    }
}

#[component]
fn LandingContent() -> impl IntoView {
    let auth = use_auth();
    let (search, set_search) = signal(String::new());
    let (city, set_city) = signal(String::new());

    // Tracks both filters, so typing in either input re-fetches the list.
    let shops = LocalResource::new(move || {
        let search = search.get();
        let city = city.get();
        async move {
            let manager = auth.manager();
            client::list_shops(manager.api(), &search, &city).await
        }
    });

    view! {
        <section class="text-center py-12">
            <h1 class="text-4xl font-bold text-stone-900">"Find Your Perfect Barber & Salon"</h1>
            <p class="mt-3 text-stone-600">
                "Discover nearby barber shops and salons. Book appointments easily."
            </p>
            <div class="mt-8 flex flex-col sm:flex-row gap-3 justify-center max-w-xl mx-auto">
                <input
                    type="text"
                    class="flex-1 bg-white border border-stone-300 text-stone-900 text-sm rounded-lg focus:ring-amber-500 focus:border-amber-500 p-2.5"
                    placeholder="Search by name, location..."
                    on:input=move |event| set_search.set(event_target_value(&event))
                />
                <input
                    type="text"
                    class="sm:w-40 bg-white border border-stone-300 text-stone-900 text-sm rounded-lg focus:ring-amber-500 focus:border-amber-500 p-2.5"
                    placeholder="City"
                    on:input=move |event| set_city.set(event_target_value(&event))
                />
            </div>
        </section>

        <section class="py-8">
            <h2 class="text-2xl font-bold text-stone-900 mb-6">"Nearby Barber Shops & Salons"</h2>
            {move || match shops.get() {
                None => view! { <div class="py-8 text-center"><Spinner /></div> }.into_any(),
                Some(Err(err)) => {
                    view! { <Alert kind=AlertKind::Error message=err.to_string() /> }.into_any()
                }
                Some(Ok(shops)) if shops.is_empty() => {
                    view! {
                        <div class="text-center py-8 text-stone-600">
                            <p>"No shops found. Be the first to list your shop!"</p>
                            <A
                                href={paths::SIGNUP}
                                {..}
                                class="inline-block mt-4 px-5 py-2.5 rounded-lg bg-amber-700 text-white hover:bg-amber-800 text-sm font-medium"
                            >
                                "Register as Barber"
                            </A>
                        </div>
                    }
                        .into_any()
                }
                Some(Ok(shops)) => {
                    view! {
                        <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                            {shops
                                .into_iter()
                                .map(|shop| view! { <ShopCard shop=shop /> })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>

        <section class="py-12 text-center border-t border-stone-200">
            <h2 class="text-2xl font-bold text-stone-900">"Are you a Barber?"</h2>
            <p class="mt-2 text-stone-600">"List your shop and reach more customers"</p>
            <A
                href={paths::SIGNUP}
                {..}
                class="inline-block mt-5 px-6 py-3 rounded-lg bg-amber-700 text-white hover:bg-amber-800 font-medium"
            >
                "Register Your Shop"
            </A>
        </section>
    }
}

#[component]
fn ShopCard(shop: Shop) -> impl IntoView {
    let owner = shop
        .barber
        .as_ref()
        .and_then(|barber| barber.name.clone())
        .unwrap_or_else(|| "Unknown".to_string());
    let rating = if shop.rating > 0.0 {
        format!("⭐ {:.1}", shop.rating)
    } else {
        "⭐ New".to_string()
    };
    let blurb = shop
        .description
        .as_deref()
        .map(|description| description.chars().take(100).collect::<String>());
    let services = shop
        .services
        .iter()
        .take(3)
        .map(|service| format!("{} - ${}", service.name, service.price))
        .collect::<Vec<_>>();

    view! {
        <div class="bg-white rounded-xl border border-stone-200 p-5 flex flex-col gap-2">
            <div class="flex items-start justify-between">
                <h3 class="text-lg font-semibold text-stone-900">{shop.name.clone()}</h3>
                <span class="text-sm text-stone-600">{rating}</span>
            </div>
            <p class="text-sm text-stone-500">"by " {owner}</p>
            <p class="text-sm text-stone-600">"📍 " {shop.address.clone()} ", " {shop.city.clone()}</p>
            {blurb.map(|blurb| view! { <p class="text-sm text-stone-600">{blurb}</p> })}
            <div class="mt-2 flex flex-wrap gap-2">
                {if services.is_empty() {
                    view! { <span class="text-xs text-stone-400">"No services listed"</span> }
                        .into_any()
                } else {
                    services
                        .into_iter()
                        .map(|service| {
                            view! {
                                <span class="px-2 py-0.5 rounded-full bg-stone-100 text-stone-700 text-xs">
                                    {service}
                                </span>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </div>
    }
}
