use crate::actions;
use crate::components::college_card::CollegeCard;
use crate::components::toast::use_toasts;
use crate::error::Notice;
use crate::models::college::FavoriteCollege;
use crate::session::use_auth;
use leptos::*;
use leptos_router::*;

#[component]
pub fn FavoritesPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    let favorites = create_rw_signal(Vec::<FavoriteCollege>::new());
    let loading = create_rw_signal(true);
    let removing = create_rw_signal(false);

    // Signed-out visitors get the prompt and no request is made
    create_effect(move |_| {
        if !auth.ready.get() {
            return;
        }
        let Some(user) = auth.user() else {
            loading.set(false);
            return;
        };
        loading.set(true);
        let store = auth.store_untracked();
        spawn_local(async move {
            match actions::load_favorites(&store, Some(&user)).await {
                Ok(list) => {
                    let _ = favorites.try_set(list);
                }
                Err(err) => toasts.push(err.notice("Error loading favorites")),
            }
            let _ = loading.try_set(false);
        });
    });

    let remove = move |favorite_id: String| {
        let user = auth.user_untracked();
        let store = auth.store_untracked();
        removing.set(true);
        spawn_local(async move {
            match actions::remove_favorite(&store, user.as_ref(), &favorite_id).await {
                Ok(list) => {
                    toasts.push(Notice::info("Removed from favorites"));
                    let _ = favorites.try_set(list);
                }
                Err(err) => toasts.push(err.notice("Error removing favorite")),
            }
            let _ = removing.try_set(false);
        });
    };

    view! {
        {move || {
            if !auth.ready.get() || (auth.is_signed_in() && loading.get()) {
                view! { <div class="loading">"Loading favorites..."</div> }.into_view()
            } else if !auth.is_signed_in() {
                view! {
                    <div class="card empty">
                        <p>"Please sign in to view your favorites"</p>
                        <A href="/signin" class="button">"Sign in"</A>
                    </div>
                }
                .into_view()
            } else {
                view! {
                    <h1 class="page-title">"My Favorites"</h1>
                    <Show
                        when=move || favorites.with(|f| !f.is_empty())
                        fallback=|| view! {
                            <div class="card empty">
                                "You haven't added any favorites yet. Start exploring colleges to add them here!"
                            </div>
                        }
                    >
                        <div class="grid">
                            <For
                                each=move || favorites.get()
                                key=|favorite| favorite.favorite_id.clone()
                                children=move |favorite: FavoriteCollege| {
                                    let favorite_id = favorite.favorite_id.clone();
                                    view! {
                                        <CollegeCard
                                            college=favorite.college
                                            on_remove=move |_: ()| remove(favorite_id.clone())
                                            busy=removing
                                        />
                                    }
                                }
                            />
                        </div>
                    </Show>
                }
                .into_view()
            }
        }}
    }
}
