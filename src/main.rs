use async_trait::async_trait;
use pixgen::{
    controller::{GenerationController, UiState},
    AspectRatio, GenError, GeminiClient, GeminiConfig, GenerateImages, ImageAsset,
    ImageClient, ImageGenerationRequest,
};
use std::env;
use std::fs;
use std::io::{self, Write};

/// Stand-in used when no API key is configured. The controller rejects the
/// submit before any client call, so this only exists to satisfy the seam.
struct UnconfiguredClient;

#[async_trait]
impl GenerateImages for UnconfiguredClient {
    async fn generate(&self, _request: ImageGenerationRequest) -> pixgen::Result<Vec<ImageAsset>> {
        Err(GenError::ConfigError(
            "GEMINI_API_KEY is not configured. Please set it in your environment.".into(),
        ))
    }
}

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    pixgen::logger::init_with_config(
        pixgen::logger::LoggerConfig::development()
            .with_level(pixgen::logger::LogLevel::Info),
    )?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    log::info!("🔍 Checking Gemini environment...");

    // Check credentials (without printing the actual value for security)
    match env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")) {
        Ok(key) => {
            log::info!("✅ Gemini API key found in environment");
            log::debug!("API key starts with: {}...", &key[..5.min(key.len())]);
        }
        Err(_) => {
            log::warn!("⚠️  No Gemini API key in environment variables");
            log::error!("❌ Image generation will fail until GEMINI_API_KEY is set");
        }
    }

    let config = GeminiConfig::from_env();

    log::info!("🖼️  Available image generation models:");
    for (id, name, provider) in ImageClient::supported_models() {
        log::info!("  {} - {} ({})", id, name, provider);
    }
    log::info!("🤖 Using model: {}", config.model_id());

    let client = match GeminiClient::new(config.clone()) {
        Ok(client) => {
            log::info!("✅ Gemini client initialized successfully");
            Some(client)
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            None
        }
    };

    let mut controller = GenerationController::new(&config);

    log::info!("🎨 Enter a prompt to generate images (or 'quit' to exit)");

    loop {
        let prompt = read_line("\nPrompt> ")?;
        if prompt.eq_ignore_ascii_case("quit") || prompt.eq_ignore_ascii_case("exit") {
            break;
        }
        controller.set_prompt(prompt);

        let count_input = read_line("Number of images (1-4) [1]> ")?;
        controller.set_count_input(&count_input);

        let aspect_input = read_line("Aspect ratio (1:1, 9:16, 16:9) [1:1]> ")?;
        controller.set_aspect_ratio(
            AspectRatio::parse(&aspect_input).unwrap_or(AspectRatio::Square),
        );

        log::info!(
            "🔄 Generating {} image(s) at {}...",
            controller.count(),
            controller.aspect_ratio()
        );

        match &client {
            Some(client) => controller.submit(client.image()).await,
            None => controller.submit(&UnconfiguredClient).await,
        }

        match controller.state() {
            UiState::Populated(assets) => {
                log::info!("✅ Generated {} image(s)!", assets.len());
                for (index, asset) in assets.iter().enumerate() {
                    let filename = controller.download_filename(index, asset);
                    match asset.decode_bytes() {
                        Ok(bytes) => match fs::write(&filename, bytes) {
                            Ok(_) => log::info!("💾 Image saved to: {}", filename),
                            Err(e) => log::error!("❌ Failed to save image: {}", e),
                        },
                        Err(e) => log::error!("❌ Failed to decode image: {}", e),
                    }
                }
            }
            UiState::Error(message) => {
                log::error!("❌ {}", message);
            }
            UiState::Loading | UiState::Idle => {}
        }
    }

    log::info!("👋 Done. Check the generated image files in the current directory");
    Ok(())
}
