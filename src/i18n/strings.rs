use crate::i18n::Locale;

/// All localized user-facing strings rendered in page bodies.
///
/// Strings are stored raw and unescaped; the renderer escapes them for HTML.
#[derive(Debug, Clone)]
pub struct UiStrings {
    // ==================== Navigation ====================
    pub nav_home: &'static str,
    pub nav_story: &'static str,
    pub nav_blog: &'static str,
    pub nav_contact: &'static str,
    pub nav_media: &'static str,
    pub nav_investors: &'static str,

    /// Label of the language switcher
    pub language_label: &'static str,

    // ==================== Contact Form ====================
    pub form_purpose: &'static str,
    pub form_full_name: &'static str,
    pub form_email: &'static str,
    pub form_title: &'static str,
    pub form_message: &'static str,
    pub form_country: &'static str,
    pub form_consent: &'static str,
    pub form_submit: &'static str,

    /// Shown after a contact record was stored
    pub contact_success: &'static str,

    /// Shown when storing failed; the form keeps its input
    pub contact_error: &'static str,

    // ==================== Errors ====================
    pub not_found_title: &'static str,
    pub not_found_body: &'static str,
}

impl UiStrings {
    /// Strings for a locale, falling back to English when a locale has no table.
    pub fn for_locale(locale: Locale) -> &'static UiStrings {
        match locale.code() {
            "fr" => &FRENCH_STRINGS,
            "es" => &SPANISH_STRINGS,
            "de" => &GERMAN_STRINGS,
            "pt" => &PORTUGUESE_STRINGS,
            "ru" => &RUSSIAN_STRINGS,
            "zh" => &CHINESE_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }
}

// ==================== English Strings ====================

/// English strings (fallback)
pub const ENGLISH_STRINGS: UiStrings = UiStrings {
    nav_home: "Home",
    nav_story: "My story",
    nav_blog: "Blog",
    nav_contact: "Contact",
    nav_media: "Media",
    nav_investors: "Investors",
    language_label: "Language",

    form_purpose: "Purpose",
    form_full_name: "Full name",
    form_email: "Email",
    form_title: "Subject",
    form_message: "Message",
    form_country: "Country",
    form_consent: "I agree that my data is used to answer my request.",
    form_submit: "Send",
    contact_success: "Thank you! Your message has been sent.",
    contact_error: "Your message could not be sent. Please try again later.",

    not_found_title: "Page not found",
    not_found_body: "The page you are looking for does not exist.",
};

// ==================== French Strings ====================

pub const FRENCH_STRINGS: UiStrings = UiStrings {
    nav_home: "Accueil",
    nav_story: "Mon histoire",
    nav_blog: "Blog",
    nav_contact: "Contact",
    nav_media: "Médias",
    nav_investors: "Investisseurs",
    language_label: "Langue",

    form_purpose: "Objet de la demande",
    form_full_name: "Nom complet",
    form_email: "E-mail",
    form_title: "Sujet",
    form_message: "Message",
    form_country: "Pays",
    form_consent: "J'accepte que mes données soient utilisées pour répondre à ma demande.",
    form_submit: "Envoyer",
    contact_success: "Merci ! Votre message a bien été envoyé.",
    contact_error: "Votre message n'a pas pu être envoyé. Veuillez réessayer plus tard.",

    not_found_title: "Page introuvable",
    not_found_body: "La page que vous cherchez n'existe pas.",
};

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: UiStrings = UiStrings {
    nav_home: "Inicio",
    nav_story: "Mi historia",
    nav_blog: "Blog",
    nav_contact: "Contacto",
    nav_media: "Medios",
    nav_investors: "Inversores",
    language_label: "Idioma",

    form_purpose: "Motivo",
    form_full_name: "Nombre completo",
    form_email: "Correo electrónico",
    form_title: "Asunto",
    form_message: "Mensaje",
    form_country: "País",
    form_consent: "Acepto que mis datos se utilicen para responder a mi solicitud.",
    form_submit: "Enviar",
    contact_success: "¡Gracias! Tu mensaje ha sido enviado.",
    contact_error: "No se pudo enviar tu mensaje. Inténtalo de nuevo más tarde.",

    not_found_title: "Página no encontrada",
    not_found_body: "La página que buscas no existe.",
};

// ==================== German Strings ====================

pub const GERMAN_STRINGS: UiStrings = UiStrings {
    nav_home: "Startseite",
    nav_story: "Meine Geschichte",
    nav_blog: "Blog",
    nav_contact: "Kontakt",
    nav_media: "Medien",
    nav_investors: "Investoren",
    language_label: "Sprache",

    form_purpose: "Anliegen",
    form_full_name: "Vollständiger Name",
    form_email: "E-Mail",
    form_title: "Betreff",
    form_message: "Nachricht",
    form_country: "Land",
    form_consent: "Ich bin einverstanden, dass meine Daten zur Beantwortung meiner Anfrage verwendet werden.",
    form_submit: "Senden",
    contact_success: "Danke! Ihre Nachricht wurde gesendet.",
    contact_error: "Ihre Nachricht konnte nicht gesendet werden. Bitte versuchen Sie es später erneut.",

    not_found_title: "Seite nicht gefunden",
    not_found_body: "Die gesuchte Seite existiert nicht.",
};

// ==================== Portuguese Strings ====================

pub const PORTUGUESE_STRINGS: UiStrings = UiStrings {
    nav_home: "Início",
    nav_story: "Minha história",
    nav_blog: "Blog",
    nav_contact: "Contato",
    nav_media: "Mídia",
    nav_investors: "Investidores",
    language_label: "Idioma",

    form_purpose: "Assunto do pedido",
    form_full_name: "Nome completo",
    form_email: "E-mail",
    form_title: "Título",
    form_message: "Mensagem",
    form_country: "País",
    form_consent: "Aceito que os meus dados sejam usados para responder ao meu pedido.",
    form_submit: "Enviar",
    contact_success: "Obrigado! A sua mensagem foi enviada.",
    contact_error: "Não foi possível enviar a sua mensagem. Tente novamente mais tarde.",

    not_found_title: "Página não encontrada",
    not_found_body: "A página que procura não existe.",
};

// ==================== Russian Strings ====================

pub const RUSSIAN_STRINGS: UiStrings = UiStrings {
    nav_home: "Главная",
    nav_story: "Моя история",
    nav_blog: "Блог",
    nav_contact: "Контакты",
    nav_media: "СМИ",
    nav_investors: "Инвесторам",
    language_label: "Язык",

    form_purpose: "Цель обращения",
    form_full_name: "Полное имя",
    form_email: "Эл. почта",
    form_title: "Тема",
    form_message: "Сообщение",
    form_country: "Страна",
    form_consent: "Я согласен(на) на использование моих данных для ответа на запрос.",
    form_submit: "Отправить",
    contact_success: "Спасибо! Ваше сообщение отправлено.",
    contact_error: "Не удалось отправить сообщение. Попробуйте позже.",

    not_found_title: "Страница не найдена",
    not_found_body: "Запрашиваемая страница не существует.",
};

// ==================== Chinese Strings ====================

pub const CHINESE_STRINGS: UiStrings = UiStrings {
    nav_home: "首页",
    nav_story: "我的故事",
    nav_blog: "博客",
    nav_contact: "联系",
    nav_media: "媒体",
    nav_investors: "投资者",
    language_label: "语言",

    form_purpose: "咨询目的",
    form_full_name: "姓名",
    form_email: "电子邮件",
    form_title: "主题",
    form_message: "留言",
    form_country: "国家",
    form_consent: "我同意使用我的数据来回复我的请求。",
    form_submit: "发送",
    contact_success: "谢谢！您的留言已发送。",
    contact_error: "留言发送失败，请稍后再试。",

    not_found_title: "页面未找到",
    not_found_body: "您访问的页面不存在。",
};
