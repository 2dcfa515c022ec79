pub mod factory;
pub mod interface;
#[cfg(feature = "local-models")]
pub mod local;
pub mod remote;
pub mod translator;

pub use factory::TranslationFactory;
pub use interface::{
    LanguagePackage, TranslationBackend, TranslationHandle, TranslationRequest, TranslationResponse,
};
pub use translator::{InstalledLanguage, TranslateError, Translator};
