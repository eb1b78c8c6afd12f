use crate::actions;
use crate::catalog::{apply_filters, CatalogFilter, Choice, PendingToggles, RefreshOrder, SortMode};
use crate::components::college_card::CollegeCard;
use crate::components::toast::use_toasts;
use crate::error::{AppError, Notice};
use crate::models::college::{College, Course, Location};
use crate::models::user::User;
use crate::session::use_auth;
use leptos::logging::log;
use leptos::*;

#[component]
pub fn CollegesPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    let colleges = create_rw_signal(Vec::<College>::new());
    let loading = create_rw_signal(true);
    let filter = create_rw_signal(CatalogFilter::default());
    let pending = create_rw_signal(PendingToggles::default());
    let reloads = store_value(RefreshOrder::default());

    let fetch_colleges = move |user: Option<User>| {
        let store = auth.store_untracked();
        let mut ticket = 0;
        reloads.update_value(|order| ticket = order.issue());
        spawn_local(async move {
            match actions::load_catalog(&store, user.as_ref()).await {
                Ok(list) => apply_reload(colleges, reloads, ticket, list),
                Err(err) => toasts.push(
                    err.notice("Error loading colleges")
                        .with_description("Please try again later"),
                ),
            }
            let _ = loading.try_set(false);
        });
    };

    // Reload whenever the signed-in user changes
    create_effect(move |_| {
        if auth.ready.get() {
            fetch_colleges(auth.user());
        }
    });

    let visible = create_memo(move |_| colleges.with(|all| filter.with(|f| apply_filters(all, f))));

    let toggle_favorite = Callback::new(move |college_id: String| {
        let mut started = false;
        pending.update(|p| started = p.try_begin(&college_id));
        if !started {
            log!("[CATALOG] Toggle for {} already in flight, ignoring click", college_id);
            return;
        }
        let user = auth.user_untracked();
        let store = auth.store_untracked();
        let snapshot = colleges.get_untracked();

        spawn_local(async move {
            let written =
                actions::write_toggle(&store, user.as_ref(), &snapshot, &college_id).await;
            let result = match written {
                Ok(action) => {
                    // ticket taken after the write so this reload sees it
                    let ticket = reloads.try_update_value(|order| order.issue());
                    actions::load_catalog(&store, user.as_ref())
                        .await
                        .map(|refreshed| (action, ticket, refreshed))
                }
                Err(err) => Err(err),
            };
            match result {
                Ok((action, ticket, refreshed)) => {
                    toasts.push(Notice::info(action.notice_title()));
                    if let Some(ticket) = ticket {
                        apply_reload(colleges, reloads, ticket, refreshed);
                    }
                }
                Err(AppError::Unauthenticated) => toasts.push(
                    Notice::error("Please sign in")
                        .with_description("You need to be logged in to add favorites"),
                ),
                Err(err) => toasts.push(err.notice("Error updating favorites")),
            }
            let _ = pending.try_update(|p| p.finish(&college_id));
        });
    });

    view! {
        <h1 class="page-title">"Explore Colleges"</h1>
        <FilterPanel filter=filter/>
        {move || {
            if loading.get() {
                view! { <div class="loading">"Loading colleges..."</div> }.into_view()
            } else if visible.with(Vec::is_empty) {
                view! { <div class="card empty">"No colleges match your filters."</div> }.into_view()
            } else {
                view! {
                    <div class="grid">
                        <For
                            each=move || visible.get()
                            key=|college| (college.id.clone(), college.is_favorite)
                            children=move |college: College| {
                                let id = college.id.clone();
                                let busy = Signal::derive(move || pending.with(|p| p.is_pending(&id)));
                                view! { <CollegeCard college=college on_toggle=toggle_favorite busy=busy/> }
                            }
                        />
                    </div>
                }
                .into_view()
            }
        }}
    }
}

fn apply_reload(
    colleges: RwSignal<Vec<College>>,
    reloads: StoredValue<RefreshOrder>,
    ticket: u64,
    list: Vec<College>,
) {
    let fresh = reloads
        .try_update_value(|order| order.accept(ticket))
        .unwrap_or(false);
    if fresh {
        let _ = colleges.try_set(list);
    } else {
        log!("[CATALOG] Dropping stale reload #{}", ticket);
    }
}

#[component]
fn FilterPanel(filter: RwSignal<CatalogFilter>) -> impl IntoView {
    let parse_fee = |raw: String| raw.trim().parse::<u32>().ok();

    view! {
        <div class="card filters">
            <input
                type="search"
                placeholder="Search colleges..."
                prop:value=move || filter.with(|f| f.search.clone())
                on:input=move |e| filter.update(|f| f.search = event_target_value(&e))
            />
            <select on:change=move |e| {
                filter.update(|f| f.location = Choice::from_select_value(&event_target_value(&e)))
            }>
                <option value="all">"All Locations"</option>
                {Location::ALL
                    .iter()
                    .map(|l| view! { <option value=l.as_str()>{l.as_str()}</option> })
                    .collect_view()}
            </select>
            <select on:change=move |e| {
                filter.update(|f| f.course = Choice::from_select_value(&event_target_value(&e)))
            }>
                <option value="all">"All Courses"</option>
                {Course::ALL
                    .iter()
                    .map(|c| view! { <option value=c.as_str()>{c.as_str()}</option> })
                    .collect_view()}
            </select>
            <select on:change=move |e| {
                filter.update(|f| f.sort = SortMode::from_select_value(&event_target_value(&e)))
            }>
                <option value=SortMode::None.as_str()>"No sorting"</option>
                <option value=SortMode::FeeLowToHigh.as_str()>"Fee: Low to High"</option>
                <option value=SortMode::FeeHighToLow.as_str()>"Fee: High to Low"</option>
            </select>
            <div class="fee-range">
                <label>"Fee range (₹)"</label>
                <input
                    type="number"
                    min="0"
                    step="10000"
                    prop:value=move || filter.with(|f| f.fee_range.min.to_string())
                    on:input=move |e| {
                        if let Some(min) = parse_fee(event_target_value(&e)) {
                            filter.update(|f| f.fee_range.min = min);
                        }
                    }
                />
                <span>"to"</span>
                <input
                    type="number"
                    min="0"
                    step="10000"
                    prop:value=move || filter.with(|f| f.fee_range.max.to_string())
                    on:input=move |e| {
                        if let Some(max) = parse_fee(event_target_value(&e)) {
                            filter.update(|f| f.fee_range.max = max);
                        }
                    }
                />
            </div>
        </div>
    }
}
