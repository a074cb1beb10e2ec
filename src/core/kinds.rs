/// Syntax-tree node kinds the scanner knows how to interpret.
///
/// Anything the grammar produces outside this set maps to
/// [`NodeKind::Unhandled`] and is routed to the diagnostic path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Preprocessor constructs
    TranslationUnit,
    PreprocIfdef,
    PreprocIf,
    PreprocElif,
    PreprocElifdef,
    PreprocElse,
    PreprocInclude,
    PreprocDef,
    PreprocFunctionDef,
    PreprocParams,
    PreprocArg,
    PreprocCall,
    PreprocDirective,
    PreprocDefined,
    HashIfdef,
    HashIfndef,
    HashIf,
    HashElif,
    HashElifdef,
    HashElifndef,
    HashElse,
    HashEndif,
    HashDefine,
    HashInclude,
    SystemLibString,
    Defined,

    // Declarations and declarators
    Declaration,
    FieldDeclaration,
    FunctionDefinition,
    FunctionDeclarator,
    AbstractFunctionDeclarator,
    ParameterList,
    ParameterDeclaration,
    OptionalParameterDeclaration,
    VariadicParameterDeclaration,
    VariadicParameter,
    InitDeclarator,
    PointerDeclarator,
    ReferenceDeclarator,
    AbstractPointerDeclarator,
    AbstractReferenceDeclarator,
    ParenthesizedDeclarator,
    ArrayDeclarator,
    TypeDefinition,
    TypeDescriptor,
    TemplateDeclaration,
    TemplateParameterList,
    TemplateArgumentList,
    TemplateType,
    TemplateFunction,
    QualifiedIdentifier,
    NamespaceIdentifier,
    NamespaceDefinition,
    DeclarationList,
    LinkageSpecification,
    UsingDeclaration,
    AliasDeclaration,
    StaticAssertDeclaration,

    // Types, classes and specifiers
    PrimitiveType,
    TypeIdentifier,
    SizedTypeSpecifier,
    TypeQualifier,
    StorageClassSpecifier,
    ClassSpecifier,
    StructSpecifier,
    UnionSpecifier,
    EnumSpecifier,
    EnumeratorList,
    Enumerator,
    BaseClassClause,
    FieldDeclarationList,
    AccessSpecifier,
    FriendDeclaration,
    ExplicitFunctionSpecifier,
    VirtualFunctionSpecifier,
    VirtualSpecifier,
    Noexcept,
    DefaultMethodClause,
    DeleteMethodClause,
    PureVirtualClause,
    FieldInitializerList,
    TrailingReturnType,
    DestructorName,
    OperatorName,
    OperatorCast,
    FieldIdentifier,
    Identifier,
    StatementIdentifier,
    LabeledStatement,

    // Expressions and statements
    CompoundStatement,
    CompoundLiteralExpression,
    ExpressionStatement,
    CastExpression,
    CallExpression,
    ArgumentList,
    ParenthesizedExpression,
    BinaryExpression,
    UnaryExpression,
    PointerExpression,
    InitializerList,
    StringLiteral,
    ConcatenatedString,
    RawStringLiteral,
    NumberLiteral,
    CharLiteral,
    True,
    False,
    Null,
    Comment,
    Error,

    // Keywords
    KwTypedef,
    KwExtern,
    KwFriend,
    KwConst,
    KwVolatile,
    KwInline,
    KwStatic,
    KwVirtual,
    KwConstexpr,
    KwExplicit,
    KwClass,
    KwStruct,
    KwUnion,
    KwEnum,
    KwPublic,
    KwPrivate,
    KwProtected,
    KwOperator,
    KwTemplate,
    KwTypename,
    KwNamespace,
    KwUsing,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    DoubleColon,
    Equals,
    Star,
    Amp,
    AmpAmp,
    Tilde,
    Lt,
    Gt,
    Quote,
    Newline,
    Ellipsis,

    Unhandled,
}

impl NodeKind {
    pub fn from_raw(kind: &str) -> Self {
        match kind {
            "translation_unit" => Self::TranslationUnit,
            "preproc_ifdef" => Self::PreprocIfdef,
            "preproc_if" => Self::PreprocIf,
            "preproc_elif" => Self::PreprocElif,
            "preproc_elifdef" => Self::PreprocElifdef,
            "preproc_else" => Self::PreprocElse,
            "preproc_include" => Self::PreprocInclude,
            "preproc_def" => Self::PreprocDef,
            "preproc_function_def" => Self::PreprocFunctionDef,
            "preproc_params" => Self::PreprocParams,
            "preproc_arg" => Self::PreprocArg,
            "preproc_call" => Self::PreprocCall,
            "preproc_directive" => Self::PreprocDirective,
            "preproc_defined" => Self::PreprocDefined,
            "#ifdef" => Self::HashIfdef,
            "#ifndef" => Self::HashIfndef,
            "#if" => Self::HashIf,
            "#elif" => Self::HashElif,
            "#elifdef" => Self::HashElifdef,
            "#elifndef" => Self::HashElifndef,
            "#else" => Self::HashElse,
            "#endif" => Self::HashEndif,
            "#define" => Self::HashDefine,
            "#include" => Self::HashInclude,
            "system_lib_string" => Self::SystemLibString,
            "defined" => Self::Defined,

            "declaration" => Self::Declaration,
            "field_declaration" => Self::FieldDeclaration,
            "function_definition" => Self::FunctionDefinition,
            "function_declarator" => Self::FunctionDeclarator,
            "abstract_function_declarator" => Self::AbstractFunctionDeclarator,
            "parameter_list" => Self::ParameterList,
            "parameter_declaration" => Self::ParameterDeclaration,
            "optional_parameter_declaration" => Self::OptionalParameterDeclaration,
            "variadic_parameter_declaration" => Self::VariadicParameterDeclaration,
            "variadic_parameter" => Self::VariadicParameter,
            "init_declarator" => Self::InitDeclarator,
            "pointer_declarator" => Self::PointerDeclarator,
            "reference_declarator" => Self::ReferenceDeclarator,
            "abstract_pointer_declarator" => Self::AbstractPointerDeclarator,
            "abstract_reference_declarator" => Self::AbstractReferenceDeclarator,
            "parenthesized_declarator" => Self::ParenthesizedDeclarator,
            "array_declarator" => Self::ArrayDeclarator,
            "type_definition" => Self::TypeDefinition,
            "type_descriptor" => Self::TypeDescriptor,
            "template_declaration" => Self::TemplateDeclaration,
            "template_parameter_list" => Self::TemplateParameterList,
            "template_argument_list" => Self::TemplateArgumentList,
            "template_type" => Self::TemplateType,
            "template_function" => Self::TemplateFunction,
            "qualified_identifier" => Self::QualifiedIdentifier,
            "namespace_identifier" => Self::NamespaceIdentifier,
            "namespace_definition" => Self::NamespaceDefinition,
            "declaration_list" => Self::DeclarationList,
            "linkage_specification" => Self::LinkageSpecification,
            "using_declaration" => Self::UsingDeclaration,
            "alias_declaration" => Self::AliasDeclaration,
            "static_assert_declaration" => Self::StaticAssertDeclaration,

            "primitive_type" => Self::PrimitiveType,
            "type_identifier" => Self::TypeIdentifier,
            "sized_type_specifier" => Self::SizedTypeSpecifier,
            "type_qualifier" => Self::TypeQualifier,
            "storage_class_specifier" => Self::StorageClassSpecifier,
            "class_specifier" => Self::ClassSpecifier,
            "struct_specifier" => Self::StructSpecifier,
            "union_specifier" => Self::UnionSpecifier,
            "enum_specifier" => Self::EnumSpecifier,
            "enumerator_list" => Self::EnumeratorList,
            "enumerator" => Self::Enumerator,
            "base_class_clause" => Self::BaseClassClause,
            "field_declaration_list" => Self::FieldDeclarationList,
            "access_specifier" => Self::AccessSpecifier,
            "friend_declaration" => Self::FriendDeclaration,
            "explicit_function_specifier" => Self::ExplicitFunctionSpecifier,
            "virtual_function_specifier" => Self::VirtualFunctionSpecifier,
            "virtual_specifier" => Self::VirtualSpecifier,
            "noexcept" => Self::Noexcept,
            "default_method_clause" => Self::DefaultMethodClause,
            "delete_method_clause" => Self::DeleteMethodClause,
            "pure_virtual_clause" => Self::PureVirtualClause,
            "field_initializer_list" => Self::FieldInitializerList,
            "trailing_return_type" => Self::TrailingReturnType,
            "destructor_name" => Self::DestructorName,
            "operator_name" => Self::OperatorName,
            "operator_cast" => Self::OperatorCast,
            "field_identifier" => Self::FieldIdentifier,
            "identifier" => Self::Identifier,
            "statement_identifier" => Self::StatementIdentifier,
            "labeled_statement" => Self::LabeledStatement,

            "compound_statement" => Self::CompoundStatement,
            "compound_literal_expression" => Self::CompoundLiteralExpression,
            "expression_statement" => Self::ExpressionStatement,
            "cast_expression" => Self::CastExpression,
            "call_expression" => Self::CallExpression,
            "argument_list" => Self::ArgumentList,
            "parenthesized_expression" => Self::ParenthesizedExpression,
            "binary_expression" => Self::BinaryExpression,
            "unary_expression" => Self::UnaryExpression,
            "pointer_expression" => Self::PointerExpression,
            "initializer_list" => Self::InitializerList,
            "string_literal" => Self::StringLiteral,
            "concatenated_string" => Self::ConcatenatedString,
            "raw_string_literal" => Self::RawStringLiteral,
            "number_literal" => Self::NumberLiteral,
            "char_literal" => Self::CharLiteral,
            "true" => Self::True,
            "false" => Self::False,
            "null" | "nullptr" => Self::Null,
            "comment" => Self::Comment,
            "ERROR" => Self::Error,

            "typedef" => Self::KwTypedef,
            "extern" => Self::KwExtern,
            "friend" => Self::KwFriend,
            "const" => Self::KwConst,
            "volatile" => Self::KwVolatile,
            "inline" => Self::KwInline,
            "static" => Self::KwStatic,
            "virtual" => Self::KwVirtual,
            "constexpr" => Self::KwConstexpr,
            "explicit" => Self::KwExplicit,
            "class" => Self::KwClass,
            "struct" => Self::KwStruct,
            "union" => Self::KwUnion,
            "enum" => Self::KwEnum,
            "public" => Self::KwPublic,
            "private" => Self::KwPrivate,
            "protected" => Self::KwProtected,
            "operator" => Self::KwOperator,
            "template" => Self::KwTemplate,
            "typename" => Self::KwTypename,
            "namespace" => Self::KwNamespace,
            "using" => Self::KwUsing,

            "(" => Self::LParen,
            ")" => Self::RParen,
            "{" => Self::LBrace,
            "}" => Self::RBrace,
            "[" => Self::LBracket,
            "]" => Self::RBracket,
            "," => Self::Comma,
            ";" => Self::Semicolon,
            ":" => Self::Colon,
            "::" => Self::DoubleColon,
            "=" => Self::Equals,
            "*" => Self::Star,
            "&" => Self::Amp,
            "&&" => Self::AmpAmp,
            "~" => Self::Tilde,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "\"" => Self::Quote,
            "\n" => Self::Newline,
            "..." => Self::Ellipsis,

            _ => Self::Unhandled,
        }
    }

    /// Leading type tokens, per the call-shape heuristic.
    pub fn is_simple_type(self) -> bool {
        matches!(
            self,
            Self::PrimitiveType | Self::TypeIdentifier | Self::SizedTypeSpecifier
        )
    }

    /// Type names spelled with several tokens, read as one piece of text.
    pub fn is_compound_type(self) -> bool {
        matches!(self, Self::QualifiedIdentifier | Self::TemplateType)
    }

    pub fn is_record_specifier(self) -> bool {
        matches!(
            self,
            Self::ClassSpecifier | Self::StructSpecifier | Self::UnionSpecifier
        )
    }

    /// Nodes that can open the argument part of a function declarator.
    pub fn is_parameter_like(self) -> bool {
        matches!(
            self,
            Self::ParameterList
                | Self::ArgumentList
                | Self::ParenthesizedExpression
                | Self::CastExpression
        )
    }

    pub fn is_parameter_declaration(self) -> bool {
        matches!(
            self,
            Self::ParameterDeclaration
                | Self::OptionalParameterDeclaration
                | Self::VariadicParameterDeclaration
        )
    }

    pub fn is_pointer_or_reference(self) -> bool {
        matches!(self, Self::Star | Self::Amp | Self::AmpAmp)
    }

    /// Declarations whose subtree is searched for parameter lists and bodies.
    pub fn is_declaration(self) -> bool {
        matches!(self, Self::Declaration | Self::FieldDeclaration)
    }
}
