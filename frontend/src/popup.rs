use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PopupProps {
    pub message:  AttrValue,
    pub on_close: Callback<()>,
}

/// Message d'erreur local et refermable (échecs de formulaires / actions).
#[function_component(Popup)]
pub fn popup(props: &PopupProps) -> Html {
    let onclick = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="popup-overlay">
            <div class="popup" role="dialog" aria-modal="true" aria-labelledby="popup-title">
                <h3 id="popup-title">{ "Erreur !" }</h3>
                <p>{ props.message.clone() }</p>
                <button class="popup-close" {onclick}>{ "Sortir" }</button>
            </div>
        </div>
    }
}
