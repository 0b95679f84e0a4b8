use jiff::Timestamp;
use payloads::Event;
use yew::prelude::*;

use crate::config::use_api_client;
use crate::utils::calendar::CalendarEntry;

#[derive(Properties, PartialEq)]
pub struct CalendarLinksProps {
    pub event: Event,
}

#[function_component]
pub fn CalendarLinks(props: &CalendarLinksProps) -> Html {
    let api = use_api_client();
    let google_url =
        CalendarEntry::for_event(&props.event, Timestamp::now()).google_calendar_url();
    let ics_url = api.event_ics_url(&props.event.id);

    html! {
        <div class="flex flex-wrap gap-3 mt-4">
            <a
                href={google_url}
                target="_blank"
                rel="noopener noreferrer"
                class="px-4 py-2 rounded-md border border-gray-300 text-sm font-medium hover:bg-gray-50"
            >
                {"Google Calendar"}
            </a>
            <a
                href={ics_url}
                class="px-4 py-2 rounded-md border border-gray-300 text-sm font-medium hover:bg-gray-50"
            >
                {"Download .ics"}
            </a>
        </div>
    }
}
