//! In-memory routing strategy.
//!
//! Routes are keyed by URL fragment and every section is generated as a
//! markup string. No network I/O is involved.

use crate::config::DONATION_FORM_ID;
use crate::types::{AppResult, Page, Route};
use crate::validation::{FieldSpec, Section, DONATION_FORM, PROFILE_FIELD, PROFILE_OPTIONS};

use super::{AfterSwap, ContentSource, HistoryEvent};

/// A relief project shown on the projects page.
#[derive(Clone, Copy, Debug)]
pub struct Project {
    /// Value of the card's `data-project` attribute.
    pub key: &'static str,
    pub title: &'static str,
    pub meta: &'static str,
    pub summary: &'static str,
    pub badge: &'static str,
    pub image: &'static str,
    pub image_alt: &'static str,
    pub cta: &'static str,
    pub more_label: &'static str,
    pub detail_title: &'static str,
    pub detail_text: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        key: "abrigo",
        title: "Ação: Abrigo Emergencial",
        meta: "Projeto em execução",
        summary: "Instalação de abrigos temporários e distribuição de kits de primeiros socorros e higiene.",
        badge: "Abrigo",
        image: "assets/images/projeto-exemplo.jpg",
        image_alt: "Abrigo emergencial montado",
        cta: "Ajudar",
        more_label: "Mais",
        detail_title: "Abrigo Emergencial",
        detail_text: "Montamos abrigos temporários e distribuímos kits de higiene e primeiros socorros para as famílias afetadas.",
    },
    Project {
        key: "cultura",
        title: "Ação: Apoio às Comunidades Indígenas",
        meta: "Parceria local",
        summary: "Projetos de apoio cultural e reconstrução com participação das lideranças locais.",
        badge: "Cultura",
        image: "assets/images/voluntarios.jpg",
        image_alt: "Voluntários",
        cta: "Voluntariar",
        more_label: "Detalhes",
        detail_title: "Apoio Cultural",
        detail_text: "Trabalhamos com lideranças locais para reconstrução cultural e suporte comunitário.",
    },
];

pub fn project_by_key(key: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|p| p.key == key)
}

/// Routes sections from the URL fragment.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateSource;

impl TemplateSource {
    /// Section for a fragment. Empty fragments show the home page, unknown
    /// ones the not-found view.
    pub fn route_for_hash(hash: &str) -> Route {
        match hash {
            "" | "#" => Route::Home,
            _ => hash
                .strip_prefix('#')
                .and_then(Route::from_slug)
                .unwrap_or(Route::NotFound),
        }
    }

    fn normalize(hash: &str) -> String {
        match hash {
            "" | "#" => format!("#{}", Route::Home.slug()),
            other => other.to_string(),
        }
    }
}

impl ContentSource for TemplateSource {
    const AFTER_SWAP: AfterSwap = AfterSwap::FocusRegion;
    const HISTORY_EVENT: HistoryEvent = HistoryEvent::HashChange;

    fn key_from_location(&self, hash: &str, _search: &str) -> String {
        Self::normalize(hash)
    }

    fn key_for_href(&self, href: &str) -> Option<String> {
        href.starts_with('#').then(|| Self::normalize(href))
    }

    fn href_for(&self, route: Route) -> String {
        format!("#{}", route.slug())
    }

    fn history_url(&self, key: &str) -> String {
        key.to_string()
    }

    async fn load(&self, key: &str) -> AppResult<Page> {
        let route = Self::route_for_hash(key);
        Ok(Page {
            key: key.to_string(),
            title: route.title(),
            content: render(route),
            route: Some(route),
        })
    }
}

/// Markup for a section.
pub fn render(route: Route) -> String {
    match route {
        Route::Home => home(),
        Route::Projetos => projects(),
        Route::Cadastro => signup(),
        Route::NotFound => not_found(),
    }
}

fn home() -> String {
    r##"
<section class="hero" aria-labelledby="intro">
  <div class="hero-content">
    <h1 id="intro">Salve Corações Inundados</h1>
    <p class="lead">Apoiamos famílias e comunidades afetadas por desabamentos e inundações — com abrigo, mantimentos e acolhimento.</p>
    <p class="cta">
      <a class="btn btn-primary" href="#cadastro" data-route>Doar / Ajudar</a>
      <a class="btn btn-outline" href="#projetos" data-route>Ver Projetos</a>
    </p>
  </div>
  <figure class="hero-figure" aria-hidden="true">
    <img src="assets/images/hero.png" alt="Equipe ajudando comunidade após inundação" class="hero-image" loading="lazy" />
  </figure>
</section>

<section class="space-top" aria-labelledby="missao">
  <h2 id="missao">Nossa missão</h2>
  <p>Salvar vidas e reconstruir esperança oferecendo suporte emergencial, abrigo temporário e apoio contínuo às comunidades afetadas.</p>
</section>

<section class="space-top" aria-labelledby="contato">
  <h2 id="contato">Contato</h2>
  <address>
    <p>Email: <a href="mailto:SCI@gmail.com">SCI@gmail.com</a></p>
    <p>Telefone: <a href="tel:+551140028922">(11) 4002-8922</a></p>
    <p>Redes: <a href="#" aria-label="Facebook">Facebook</a> · <a href="#" aria-label="Instagram">Instagram</a></p>
  </address>
</section>
"##
    .to_string()
}

fn projects() -> String {
    let cards: String = PROJECTS.iter().map(project_card).collect();
    format!(
        "<h1>Projetos</h1>\n<div class=\"grid projects-grid\" aria-live=\"polite\">\n{}</div>\n",
        cards
    )
}

fn project_card(p: &Project) -> String {
    format!(
        r##"<article class="card project-card">
  <img src="{image}" alt="{alt}" class="card-image" loading="lazy" />
  <div class="card-body">
    <p class="meta">{meta}</p>
    <h3>{title}</h3>
    <p>{summary}</p>
    <div class="card-footer">
      <span class="badge">{badge}</span>
      <div class="card-actions">
        <a class="btn btn-primary" href="#cadastro" data-route>{cta}</a>
        <button type="button" class="btn btn-outline btn-more" data-project="{key}">{more}</button>
      </div>
    </div>
  </div>
</article>
"##,
        image = p.image,
        alt = escape(p.image_alt),
        meta = p.meta,
        title = p.title,
        summary = p.summary,
        badge = p.badge,
        cta = p.cta,
        key = p.key,
        more = p.more_label,
    )
}

fn signup() -> String {
    let mut html = format!(
        "<h1>Doar / Cadastrar</h1>\n<section aria-labelledby=\"formsec\">\n\
         <h2 id=\"formsec\">Formulário de Doação / Apoio</h2>\n\
         <form id=\"{}\" class=\"form-card\" novalidate>\n",
        DONATION_FORM_ID
    );

    for section in [Section::Personal, Section::Address] {
        html.push_str(&format!("<fieldset>\n<legend>{}</legend>\n", section.legend()));
        for spec in DONATION_FORM.iter().filter(|spec| spec.section == section) {
            html.push_str(&field(spec));
        }
        html.push_str("</fieldset>\n");
    }

    html.push_str("<fieldset>\n<legend>Preferência</legend>\n<p>Quem está se cadastrando:</p>\n");
    for (i, (value, label)) in PROFILE_OPTIONS.iter().enumerate() {
        let checked = if i == 0 { " checked" } else { "" };
        html.push_str(&format!(
            "<label class=\"radio-inline\"><input type=\"radio\" name=\"{}\" value=\"{}\"{} /> {}</label>\n",
            PROFILE_FIELD, value, checked, label
        ));
    }
    html.push_str("</fieldset>\n");

    html.push_str(
        "<p class=\"form-actions\">\n\
         <button type=\"submit\" class=\"btn btn-primary\">Enviar</button>\n\
         <button type=\"reset\" class=\"btn btn-outline\">Limpar</button>\n\
         </p>\n</form>\n</section>\n",
    );
    html
}

/// Label, input and error slot for one field.
fn field(spec: &FieldSpec) -> String {
    let mut attrs = format!(
        "id=\"{id}\" name=\"{id}\" type=\"{}\"",
        spec.kind.as_str(),
        id = spec.id
    );
    let optional = [
        ("inputmode", spec.input_mode),
        ("placeholder", spec.placeholder),
        ("pattern", spec.pattern),
        ("title", spec.hint),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            attrs.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
    }
    if let Some(max) = spec.max_length {
        attrs.push_str(&format!(" maxlength=\"{}\"", max));
    }
    if spec.required {
        attrs.push_str(" required");
    }

    format!(
        "<label for=\"{id}\">{label}</label>\n<input {attrs} />\n\
         <div class=\"field-error\" data-error-for=\"{id}\" aria-live=\"polite\"></div>\n",
        id = spec.id,
        label = spec.label,
        attrs = attrs,
    )
}

fn not_found() -> String {
    format!(
        "<h1>Não encontrado</h1>\n<p>Página não existe. Volte para <a href=\"#{}\" data-route>Início</a>.</p>\n",
        Route::Home.slug()
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
