use crate::models::college::College;
use leptos::*;

pub fn format_fee(fee: u32) -> String {
    // Indian digit grouping: 2,20,000
    let digits = fee.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, back) = rest.split_at(rest.len() - 2);
        groups.push(back);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();
    format!("₹{},{}", groups.join(","), tail)
}

/// Card for one catalog entry. `on_toggle` is omitted on pages without a
/// favorite button; `on_remove` adds a remove button instead.
#[component]
pub fn CollegeCard(
    college: College,
    #[prop(optional, into)] on_toggle: Option<Callback<String>>,
    #[prop(optional, into)] on_remove: Option<Callback<()>>,
    #[prop(optional, into)] busy: MaybeSignal<bool>,
) -> impl IntoView {
    let College {
        id,
        name,
        location,
        course,
        fee,
        is_favorite,
    } = college;
    let busy = Signal::derive(move || busy.get());

    view! {
        <div class="card college-card">
            <div class="card-header">
                <h3>{name}</h3>
                {on_toggle.map(|on_toggle| {
                    let label = if is_favorite { "Remove from favorites" } else { "Add to favorites" };
                    view! {
                        <button
                            class="favorite-toggle"
                            class:filled=is_favorite
                            aria-label=label
                            disabled=move || busy.get()
                            on:click=move |_| on_toggle.call(id.clone())
                        >
                            {if is_favorite { "♥" } else { "♡" }}
                        </button>
                    }
                })}
            </div>
            <ul class="college-facts">
                <li>"📍 " {location.as_str()}</li>
                <li>"📘 " {course.as_str()}</li>
                <li>{format_fee(fee)} " / year"</li>
            </ul>
            {on_remove.map(|on_remove| view! {
                <button class="button destructive" disabled=move || busy.get() on:click=move |_| on_remove.call(())>
                    "Remove from favorites"
                </button>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::format_fee;

    #[test]
    fn fees_use_indian_grouping() {
        assert_eq!(format_fee(0), "₹0");
        assert_eq!(format_fee(950), "₹950");
        assert_eq!(format_fee(40_000), "₹40,000");
        assert_eq!(format_fee(220_000), "₹2,20,000");
        assert_eq!(format_fee(12_345_678), "₹1,23,45,678");
    }
}
