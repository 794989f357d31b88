//! 组合根示例：启动时构建容器并注册服务，解析入口服务，退出前统一释放。

use anyhow::Context;
use clap::Parser;
use di_container::config::ConfigLoader;
use di_container::logging::{init_logging, LogFormat};
use di_container::{injectable, Container, Dispose};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "di-demo", version, about = "Dependency injection container demo")]
struct Args {
    /// 配置文件路径（TOML）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖配置中的日志级别
    #[arg(long)]
    log_level: Option<String>,

    /// 覆盖配置中的日志格式
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// 要问候的用户
    #[arg(default_value = "world")]
    names: Vec<String>,
}

trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

struct TracingLogger;

impl TracingLogger {
    fn new() -> Self {
        TracingLogger
    }
}

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!(target: "di_demo", "{message}");
    }
}

injectable!(TracingLogger => TracingLogger::new());

/// 应用级设置，直接注册为实例
struct Greeting {
    template: String,
}

/// 记录问候历史，退出时输出汇总
struct GreetingStore {
    logger: Arc<dyn Logger>,
    history: Mutex<Vec<String>>,
}

impl GreetingStore {
    fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            history: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, message: String) {
        self.history.lock().push(message);
    }
}

impl Dispose for GreetingStore {
    fn dispose(&self) -> anyhow::Result<()> {
        let history = self.history.lock();
        self.logger
            .log(&format!("greeting store closed after {} entries", history.len()));
        Ok(())
    }
}

injectable!(GreetingStore => GreetingStore::new(dyn Logger); dispose);

struct Greeter {
    greeting: Arc<Greeting>,
    store: Arc<GreetingStore>,
    logger: Arc<dyn Logger>,
}

impl Greeter {
    fn new(greeting: Arc<Greeting>, store: Arc<GreetingStore>, logger: Arc<dyn Logger>) -> Self {
        Self {
            greeting,
            store,
            logger,
        }
    }

    fn greet(&self, name: &str) -> String {
        let message = self.greeting.template.replace("{name}", name);
        self.logger.log(&message);
        self.store.record(message.clone());
        message
    }
}

injectable!(Greeter => Greeter::new(Greeting, GreetingStore, dyn Logger));

fn bootstrap(container: &Container) -> anyhow::Result<()> {
    container.register_instance(Arc::new(Greeting {
        template: "Hello, {name}!".to_string(),
    }))?;
    container.register_type_as::<dyn Logger, TracingLogger>(|logger| logger)?;
    container.register_type::<GreetingStore>()?;
    container.register_type::<Greeter>()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let loader = match &args.config {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let mut settings = loader.load().context("failed to load configuration")?;
    if let Some(level) = args.log_level {
        settings.logging.level = level;
    }
    if let Some(format) = args.log_format {
        settings.logging.format = format;
    }
    settings.validate()?;

    init_logging(&settings.logging.to_logging_config()?)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let container = Arc::new(Container::with_config(settings.container.clone()));
    {
        let _span = tracing::info_span!("bootstrap").entered();
        bootstrap(&container)?;
        tracing::info!(services = container.registered_keys().len(), "服务注册完成");
    }

    let greeter = container.resolve::<Greeter>()?;
    for name in &args.names {
        println!("{}", greeter.greet(name));
    }

    tracing::info!(stats = %container.stats().summary(), "Resolution finished");
    container.dispose()?;
    Ok(())
}
