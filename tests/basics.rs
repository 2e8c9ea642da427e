use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reflective_di::{
    value, Ctor, InjectError, InjectionToken, Injector, Provider, ReflectiveInjector, Token,
    TokenResolver,
};

#[test]
fn test_value_provider_is_cache_stable() {
    let injector = ReflectiveInjector::resolve_and_create(vec![Provider::Value {
        provide: Token::of::<String>(),
        use_value: value("hello".to_string()),
    }])
    .unwrap();

    let a = injector.get_type::<String>().unwrap();
    let b = injector.get_type::<String>().unwrap();

    assert_eq!(*a, "hello");
    assert!(Arc::ptr_eq(&a, &b)); // Same instance on every call
}

#[test]
fn test_class_provider_constructs_once() {
    static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

    struct Service {
        id: usize,
    }

    let injector = ReflectiveInjector::resolve_and_create(vec![Provider::Constructor {
        provide: Ctor::of::<Service, _>(|_| Service {
            id: CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst),
        }),
        deps: Some(vec![]),
    }])
    .unwrap();

    let first = injector.get_type::<Service>().unwrap();
    let second = injector.get_type::<Service>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.id, 0);
    assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 1); // Constructor side effect ran once
}

#[test]
fn test_class_provider_with_dependencies() {
    struct Config {
        port: u16,
    }

    struct Server {
        port: u16,
        name: String,
    }

    let injector = ReflectiveInjector::resolve_and_create(vec![
        Provider::Value {
            provide: Token::of::<Config>(),
            use_value: value(Config { port: 8080 }),
        },
        Provider::Value {
            provide: Token::of::<String>(),
            use_value: value("MyServer".to_string()),
        },
        Provider::Constructor {
            provide: Ctor::of::<Server, _>(|args| Server {
                port: args[0].downcast_ref::<Config>().unwrap().port,
                name: args[1].downcast_ref::<String>().unwrap().clone(),
            }),
            deps: Some(vec![
                Token::of::<Config>().into(),
                Token::of::<String>().into(),
            ]),
        },
    ])
    .unwrap();

    let server = injector.get_type::<Server>().unwrap();
    assert_eq!(server.port, 8080);
    assert_eq!(server.name, "MyServer");
}

#[test]
fn test_class_instance_cached_under_concrete_type() {
    struct EngineImpl {
        cylinders: u8,
    }

    let engine: InjectionToken<EngineImpl> = InjectionToken::new("engine");
    let injector = ReflectiveInjector::resolve_and_create(vec![Provider::Class {
        provide: engine.token(),
        use_class: Ctor::of::<EngineImpl, _>(|_| EngineImpl { cylinders: 6 }),
        deps: Some(vec![]),
    }])
    .unwrap();

    let by_token = injector.get_token(&engine).unwrap();
    // The factory registered the instance under its concrete type too, so a
    // lookup by the class token hits the cache even though no provider was
    // declared for it.
    let by_type = injector.get_type::<EngineImpl>().unwrap();

    assert_eq!(by_type.cylinders, 6);
    assert!(Arc::ptr_eq(&by_token, &by_type));
}

#[test]
fn test_existing_provider_aliases_to_same_instance() {
    struct Database {
        url: String,
    }

    let primary: InjectionToken<Database> = InjectionToken::new("db.primary");
    let injector = ReflectiveInjector::resolve_and_create(vec![
        Provider::Value {
            provide: Token::of::<Database>(),
            use_value: value(Database {
                url: "postgres://localhost".to_string(),
            }),
        },
        Provider::Existing {
            provide: primary.token(),
            use_existing: Token::of::<Database>(),
        },
    ])
    .unwrap();

    let aliased = injector.get_token(&primary).unwrap();
    let direct = injector.get_type::<Database>().unwrap();

    assert_eq!(aliased.url, "postgres://localhost");
    assert!(Arc::ptr_eq(&aliased, &direct));
}

#[test]
fn test_factory_provider_invoked_with_resolved_deps() {
    let base: InjectionToken<u32> = InjectionToken::new("base");
    let squared: InjectionToken<u32> = InjectionToken::new("squared");

    let injector = ReflectiveInjector::resolve_and_create(vec![
        Provider::Value {
            provide: base.token(),
            use_value: value(7u32),
        },
        Provider::Factory {
            provide: squared.token(),
            use_factory: Arc::new(|args| {
                let n = args[0].downcast_ref::<u32>().unwrap();
                value(n * n)
            }),
            deps: Some(vec![base.token().into()]),
        },
    ])
    .unwrap();

    assert_eq!(*injector.get_token(&squared).unwrap(), 49);
}

#[test]
fn test_first_match_wins() {
    static CLASS_CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

    struct Widget {
        label: &'static str,
    }

    let token = Token::of::<Widget>();
    let injector = ReflectiveInjector::resolve_and_create(vec![
        Provider::Value {
            provide: token.clone(),
            use_value: value(Widget { label: "from-value" }),
        },
        Provider::Class {
            provide: token.clone(),
            use_class: Ctor::of::<Widget, _>(|_| {
                CLASS_CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
                Widget { label: "from-class" }
            }),
            deps: Some(vec![]),
        },
    ])
    .unwrap();

    let widget = injector.get_type::<Widget>().unwrap();
    assert_eq!(widget.label, "from-value");
    // The later provider for the same token is a dead declaration.
    assert_eq!(CLASS_CONSTRUCTED.load(Ordering::SeqCst), 0);
}

#[test]
fn test_not_found_at_empty_root() {
    struct Unregistered;

    let injector = ReflectiveInjector::resolve_and_create(vec![]).unwrap();
    let result = injector.get(&Token::of::<Unregistered>());
    assert!(matches!(result, Err(InjectError::NotFound(_))));
}

#[test]
fn test_null_value_is_an_error() {
    let token: InjectionToken<reflective_di::Null> = InjectionToken::new("nothing");
    let injector = ReflectiveInjector::resolve_and_create(vec![Provider::Value {
        provide: token.token(),
        use_value: value(reflective_di::Null),
    }])
    .unwrap();

    assert_eq!(
        injector.get(&token.token()).unwrap_err(),
        InjectError::NullValue("nothing")
    );
}

#[test]
fn test_factory_runs_lazily() {
    static FACTORY_RUNS: AtomicUsize = AtomicUsize::new(0);

    let token: InjectionToken<u8> = InjectionToken::new("lazy");
    let injector = ReflectiveInjector::resolve_and_create(vec![Provider::Factory {
        provide: token.token(),
        use_factory: Arc::new(|_| {
            FACTORY_RUNS.fetch_add(1, Ordering::SeqCst);
            value(1u8)
        }),
        deps: None,
    }])
    .unwrap();

    // Construction alone runs nothing.
    assert_eq!(FACTORY_RUNS.load(Ordering::SeqCst), 0);
    injector.get_token(&token).unwrap();
    injector.get_token(&token).unwrap();
    assert_eq!(FACTORY_RUNS.load(Ordering::SeqCst), 1);
}
